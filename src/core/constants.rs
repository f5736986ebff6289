// Cast targeting
pub const CAST_RANGE: f64 = 600.0;

// Line tension
pub const LINE_BREAK_DISTANCE: f64 = 900.0;
pub const LINE_BREAK_THRESHOLD: f64 = 0.95;

// Bite timer: p(t) = BASE_CHANCE * (1 + TIME_RAMP * t/D) * distance_multiplier
pub const BITE_TIMER_MS: u64 = 10_000;
pub const BITE_CHECK_INTERVAL_MS: u64 = 200;
pub const BITE_BASE_CHANCE: f64 = 0.01;
pub const BITE_TIME_RAMP: f64 = 4.0;

// Distance multiplier curve: min + (max - min) * normalized^exponent
pub const DISTANCE_MULTIPLIER_MIN: f64 = 0.2;
pub const DISTANCE_MULTIPLIER_MAX: f64 = 2.5;
pub const DISTANCE_MULTIPLIER_EXPONENT: f64 = 1.8;

// Fight simulation (~60 Hz)
pub const FIGHT_TICK_MS: u64 = 16;
pub const FISH_SWIM_SPEED: f64 = 90.0; // units per second
pub const FISH_DRIFT_SPEED: f64 = 12.0; // units per second at zero stress
pub const DRIFT_STRESS_SCALE: f64 = 3.0;
pub const ZIGZAG_SWEEP_DISTANCE: f64 = 60.0;
pub const ZIGZAG_ARRIVAL_RADIUS: f64 = 8.0;
pub const ZIGZAG_NEAR_RADIUS: f64 = 25.0;
pub const DIRECTION_CHANGE_INTERVAL_MS: u64 = 1_200;
pub const BURST_CHANCE: f64 = 0.004; // per fight tick
pub const BURST_DISTANCE: f64 = 120.0;

// Reeling
pub const REEL_STEP_DISTANCE: f64 = 40.0;
pub const REEL_PATH_SAMPLES: u32 = 5;
pub const REEL_SUCCESS_FRACTION: f64 = 0.8;

// Host frame handling
pub const MAX_FRAME_MS: u64 = 100;
