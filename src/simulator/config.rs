//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of sessions to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Cast distance as a fraction of the cast range (0.0-1.0)
    pub cast_fraction: f64,

    /// Reel once every this many ms while hooked (None = never reel)
    pub reel_interval_ms: Option<u64>,

    /// Host frame length fed to `update`
    pub frame_ms: u64,

    /// A session still running after this long is cancelled
    pub max_session_ms: u64,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            cast_fraction: 1.0,
            reel_interval_ms: Some(250),
            frame_ms: 16,
            max_session_ms: 120_000,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Casting right at the player's feet, waiting only
    pub fn near_cast(num_runs: u32) -> Self {
        Self {
            num_runs,
            cast_fraction: 0.0,
            reel_interval_ms: None,
            ..Default::default()
        }
    }

    /// Casting at full range, waiting only
    pub fn far_cast(num_runs: u32) -> Self {
        Self {
            num_runs,
            cast_fraction: 1.0,
            reel_interval_ms: None,
            ..Default::default()
        }
    }
}
