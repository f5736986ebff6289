//! Bite timing: the distance reward curve and the per-check bite roll.
//!
//! Each bite check rolls against
//!
//! `p(t) = base_chance * (1 + ramp * t/D) * distance_multiplier`
//!
//! so the chance grows linearly over the timer and casting far out into open
//! water pays off non-linearly.

use rand::Rng;

use super::types::{FishingSession, Phase};
use crate::config::FishingConstants;
use crate::core::Vec2;

/// Outcome of one bite check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitingStep {
    /// No bite yet, timer still running
    Continue,
    /// A fish bit; the session is now in [`Phase::Caught`]
    Bite,
    /// The timer ran out without a bite
    TimedOut,
    /// The player is farther from the bobber than the break distance
    PlayerWalkedAway,
}

/// Multiplier applied to every bite roll of a session, derived once from the
/// cast distance. Monotonic non-decreasing in `cast_distance`.
pub fn distance_multiplier(cast_distance: f64, constants: &FishingConstants) -> f64 {
    let normalized = (cast_distance / constants.cast_range).clamp(0.0, 1.0);
    constants.distance_multiplier_min
        + (constants.distance_multiplier_max - constants.distance_multiplier_min)
            * normalized.powf(constants.distance_multiplier_exponent)
}

/// Bite chance for a single check at `elapsed_fraction` (0..=1) of the timer.
/// Non-decreasing in `elapsed_fraction`.
pub fn bite_probability(
    elapsed_fraction: f64,
    distance_multiplier: f64,
    constants: &FishingConstants,
) -> f64 {
    let t = elapsed_fraction.clamp(0.0, 1.0);
    (constants.bite_base_chance * (1.0 + constants.bite_time_ramp * t) * distance_multiplier)
        .clamp(0.0, 1.0)
}

/// True once the player is farther from the bobber than the line reaches.
pub fn player_walked_away(
    session: &FishingSession,
    player: Vec2,
    constants: &FishingConstants,
) -> bool {
    player.distance(session.bobber.position) > constants.line_break_distance
}

/// Advances the bite timer by one check interval and rolls for a bite.
///
/// The player-distance check runs first: walking away from the line ends the
/// session before any roll is made.
pub fn step_waiting<R: Rng>(
    session: &mut FishingSession,
    player: Vec2,
    constants: &FishingConstants,
    rng: &mut R,
) -> WaitingStep {
    if player_walked_away(session, player, constants) {
        return WaitingStep::PlayerWalkedAway;
    }

    session.bite_elapsed_ms =
        (session.bite_elapsed_ms + constants.bite_check_interval_ms).min(session.bite_timer_ms);
    let fraction = if session.bite_timer_ms == 0 {
        1.0
    } else {
        session.bite_elapsed_ms as f64 / session.bite_timer_ms as f64
    };

    let chance = bite_probability(fraction, session.distance_multiplier, constants);
    if rng.gen::<f64>() < chance {
        session.phase = Phase::Caught;
        session.fight_elapsed_ms = 0;
        session.bobber.last_direction_change_ms = 0;
        session.bobber.zigzag_target = None;
        log::debug!(
            "Bite after {}ms (chance {:.4}, multiplier {:.2})",
            session.bite_elapsed_ms,
            chance,
            session.distance_multiplier
        );
        return WaitingStep::Bite;
    }

    if session.bite_elapsed_ms >= session.bite_timer_ms {
        WaitingStep::TimedOut
    } else {
        WaitingStep::Continue
    }
}
