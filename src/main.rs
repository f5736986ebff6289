mod app;
mod input;
mod ui;

use angler::build_info;
use angler::config::FishingConstants;
use app::App;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Log file for the terminal host; stderr would corrupt the TUI
const LOG_FILE: &str = "angler.log";

/// Every authority command of the run, one JSON object per line
const COMMAND_LOG_FILE: &str = "angler_commands.jsonl";

/// Input poll interval, roughly one fight tick
const FRAME_POLL_MS: u64 = 16;

struct CliArgs {
    seed: Option<u64>,
    config: Option<PathBuf>,
    print_config: bool,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    let loaded = match &cli.config {
        Some(path) => FishingConstants::load(path),
        None => FishingConstants::load_or_default(),
    };
    let constants = match loaded {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid fishing config: {}", e);
            std::process::exit(1);
        }
    };

    if cli.print_config {
        match constants.to_json_pretty() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not serialize config: {}", e),
        }
        return Ok(());
    }

    let log_file = File::create(LOG_FILE)?;
    let _ = env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .try_init();

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut app = App::new(constants, seed);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;

    if let Err(e) = std::fs::write(COMMAND_LOG_FILE, app.engine.authority().to_json_lines()) {
        log::warn!("Could not write {}: {}", COMMAND_LOG_FILE, e);
    }
    log::info!(
        "Exiting after {} session(s)",
        app.engine.sessions_started()
    );
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        let viewport = ui::viewport_for(terminal.size()?, app.map.world_size());

        if event::poll(Duration::from_millis(FRAME_POLL_MS))? {
            let ev = event::read()?;
            if let Some(action) = input::map_event(&ev) {
                app.handle(action, &viewport);
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame
        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        if elapsed_ms > 0 {
            last_tick += Duration::from_millis(elapsed_ms);
            app.tick(elapsed_ms);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut cli = CliArgs {
        seed: None,
        config: None,
        print_config: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                if i + 1 < args.len() {
                    cli.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    cli.config = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--print-config" => {
                cli.print_config = true;
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Run 'angler --help' for usage.");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_help() {
    println!("Angler - Terminal Fishing\n");
    println!("Usage: angler [options]\n");
    println!("Options:");
    println!("  --seed <N>       Lake generation and fish RNG seed");
    println!("  --config <PATH>  Load fishing constants from a JSON file");
    println!("  --print-config   Print the effective constants as JSON and exit");
    println!("  --version        Show version information");
    println!("  --help           Show this help message");
    println!();
    println!("Controls:");
    println!("  Mouse            Aim; left click casts onto open water");
    println!("  R / right click  Reel while a fish is on");
    println!("  Esc              Cancel the cast");
    println!("  E                Equip / stow the rod");
    println!("  Arrows / WASD    Walk along the shore");
    println!("  Q                Quit");
    println!();
    println!("Logs go to {} (set RUST_LOG=debug for more).", LOG_FILE);
    println!("Authority commands are saved to {} on exit.", COMMAND_LOG_FILE);
}
