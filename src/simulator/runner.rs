//! Main simulation runner using `FishingEngine` for real session mechanics.
//!
//! Each run casts once from the origin into open water and feeds the engine
//! fixed-length frames until the session resolves. Statistics are read from
//! the engine's snapshots and the final `Resolution`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::config::SimConfig;
use super::report::SimReport;
use crate::authority::RecordingAuthority;
use crate::config::FishingConstants;
use crate::core::Vec2;
use crate::fishing::{CancelReason, FailureReason, FishingEngine, Phase, SessionOutcome};

/// Simplified terminal outcome of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Success,
    NoBite,
    LineBroke,
    Cancelled,
    /// Hit `max_session_ms` and was cancelled by the runner
    TimedOut,
}

/// Statistics for a single simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    /// Bite timer elapsed when the fish bit (None = no bite)
    pub time_to_bite_ms: Option<u64>,
    pub fight_ms: u64,
    pub reels: u32,
    pub bursts: u32,
    pub authority_commands: usize,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig, constants: &FishingConstants) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, constants, &mut rng);

        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, bite {:?}ms, fight {}ms, reels {}, bursts {}",
                run_idx + 1,
                config.num_runs,
                stats.outcome,
                stats.time_to_bite_ms,
                stats.fight_ms,
                stats.reels,
                stats.bursts
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs, config)
}

/// Simulates one session from cast to resolution.
fn simulate_single_run(
    config: &SimConfig,
    constants: &FishingConstants,
    rng: &mut ChaCha8Rng,
) -> RunStats {
    let open_water = |_x: f64, _y: f64| true;
    let player = Vec2::ZERO;
    let pointer = Vec2::new(constants.cast_range * config.cast_fraction.clamp(0.0, 1.0), 0.0);

    let mut engine = FishingEngine::new(constants.clone(), RecordingAuthority::new());
    engine.set_rod_equipped(true);

    let mut stats = RunStats {
        outcome: RunOutcome::Cancelled,
        time_to_bite_ms: None,
        fight_ms: 0,
        reels: 0,
        bursts: 0,
        authority_commands: 0,
    };

    if engine.on_primary_click(player, pointer, &open_water).is_err() {
        return stats;
    }

    let frame_ms = config.frame_ms.max(1);
    let mut elapsed_ms = 0;
    let mut since_reel_ms = 0;

    let resolution = loop {
        if elapsed_ms >= config.max_session_ms {
            stats.outcome = RunOutcome::TimedOut;
            break engine.cancel();
        }

        if let Some(interval) = config.reel_interval_ms {
            if engine.phase() == Some(Phase::Caught) {
                since_reel_ms += frame_ms;
                if since_reel_ms >= interval && engine.on_reel() {
                    since_reel_ms = 0;
                    stats.reels += 1;
                }
            }
        }

        if let Some(resolution) = engine.update(frame_ms, player, &open_water, rng) {
            break Some(resolution);
        }
        elapsed_ms += frame_ms;

        if let Some(session) = engine.session() {
            if session.phase == Phase::Caught && stats.time_to_bite_ms.is_none() {
                stats.time_to_bite_ms = Some(session.bite_elapsed_ms);
            }
            stats.fight_ms = session.fight_elapsed_ms;
            stats.bursts = session.bursts;
        }
    };

    if let Some(resolution) = resolution {
        if stats.outcome != RunOutcome::TimedOut {
            stats.outcome = match resolution.outcome {
                SessionOutcome::Success { .. } => RunOutcome::Success,
                SessionOutcome::Failure(FailureReason::NoBite) => RunOutcome::NoBite,
                SessionOutcome::Failure(FailureReason::LineBroke) => RunOutcome::LineBroke,
                SessionOutcome::Cancelled(CancelReason::UserCancelled)
                | SessionOutcome::Cancelled(CancelReason::RodUnequipped)
                | SessionOutcome::Cancelled(CancelReason::PlayerWalkedAway) => {
                    RunOutcome::Cancelled
                }
            };
        }
        if let Some(bite_ms) = stats.time_to_bite_ms {
            stats.fight_ms = resolution.duration_ms.saturating_sub(bite_ms);
        }
    }
    stats.authority_commands = engine.authority().commands.len();

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 20,
            seed: Some(7),
            verbosity: 0,
            ..Default::default()
        };
        let c = FishingConstants::default();

        let a = run_simulation(&config, &c);
        let b = run_simulation(&config, &c);

        let outcomes_a: Vec<_> = a.run_stats.iter().map(|r| r.outcome).collect();
        let outcomes_b: Vec<_> = b.run_stats.iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes_a, outcomes_b);
    }

    #[test]
    fn test_every_run_sends_cast_and_one_terminal() {
        let config = SimConfig {
            num_runs: 30,
            seed: Some(11),
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config, &FishingConstants::default());
        for run in &report.run_stats {
            assert_eq!(run.authority_commands, 2);
        }
    }

    #[test]
    fn test_steady_reeling_lands_hooked_fish() {
        let c = FishingConstants {
            bite_base_chance: 1.0,
            burst_chance: 0.0,
            ..Default::default()
        };
        let config = SimConfig {
            num_runs: 10,
            seed: Some(3),
            reel_interval_ms: Some(100),
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config, &c);
        assert_eq!(report.successes, 10);
    }

    #[test]
    fn test_no_reeling_breaks_line() {
        let c = FishingConstants {
            bite_base_chance: 1.0,
            ..Default::default()
        };
        let config = SimConfig {
            num_runs: 10,
            seed: Some(4),
            reel_interval_ms: None,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config, &c);
        assert_eq!(report.line_broke, 10);
    }

    #[test]
    fn test_session_limit_cancels() {
        let c = FishingConstants {
            bite_base_chance: 0.0,
            ..Default::default()
        };
        let config = SimConfig {
            num_runs: 3,
            seed: Some(5),
            max_session_ms: 1_000,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config, &c);
        assert_eq!(report.timed_out, 3);
    }
}
