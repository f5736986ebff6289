//! Fishing balance simulator CLI.
//!
//! Run Monte Carlo simulations of fishing sessions to tune the constants.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 1000 full-range casts
//!   cargo run --bin simulate -- --distance 0 -n 500 # Casts at the player's feet
//!   cargo run --bin simulate -- --seed 42           # Reproducible run

use angler::config::FishingConstants;
use angler::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::PathBuf;

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_default_env().init();

    let args: Vec<String> = env::args().collect();
    let (config, config_path) = parse_args(&args);

    let constants = match config_path {
        Some(path) => FishingConstants::load(&path),
        None => Ok(FishingConstants::default()),
    };
    let constants = match constants {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid fishing config: {}", e);
            std::process::exit(1);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ANGLER FISHING SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!(
        "  Cast Distance:  {:.0} ({:.0}% of range)",
        constants.cast_range * config.cast_fraction,
        config.cast_fraction * 100.0
    );
    match config.reel_interval_ms {
        Some(ms) => println!("  Reel:           every {}ms", ms),
        None => println!("  Reel:           never"),
    }
    println!("  Session Limit:  {}ms", config.max_session_ms);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config, &constants);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "fishing_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json())?;
        println!("JSON report saved to: {}", filename);
    }

    Ok(())
}

fn parse_args(args: &[String]) -> (SimConfig, Option<PathBuf>) {
    let mut config = SimConfig::default();
    let mut config_path = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-d" | "--distance" => {
                if i + 1 < args.len() {
                    config.cast_fraction = args[i + 1]
                        .parse::<f64>()
                        .map(|f| f.clamp(0.0, 1.0))
                        .unwrap_or(1.0);
                    i += 1;
                }
            }
            "-r" | "--reel-ms" => {
                if i + 1 < args.len() {
                    // 0 disables reeling
                    config.reel_interval_ms = args[i + 1].parse::<u64>().ok().filter(|ms| *ms > 0);
                    i += 1;
                }
            }
            "--max-ms" => {
                if i + 1 < args.len() {
                    config.max_session_ms = args[i + 1].parse().unwrap_or(120_000);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "--near" => {
                config = SimConfig::near_cast(config.num_runs);
            }
            "--far" => {
                config = SimConfig::far_cast(config.num_runs);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    (config, config_path)
}

fn print_help() {
    println!("Angler Fishing Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of sessions (default: 1000)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -d, --distance <F>    Cast distance as a fraction of range (default: 1.0)");
    println!("    -r, --reel-ms <MS>    Reel interval while hooked, 0 = never (default: 250)");
    println!("    --max-ms <MS>         Session limit before cancelling (default: 120000)");
    println!("    -c, --config <PATH>   Load fishing constants from a JSON file");
    println!("    --near                Wait-only casts at the player's feet");
    println!("    --far                 Wait-only casts at full range");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    -h, --help            Show this help");
}
