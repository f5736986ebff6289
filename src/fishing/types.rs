//! Fishing session data structures.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// Where a cast line lands. Immutable once the cast succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastTarget {
    pub x: f64,
    pub y: f64,
}

impl CastTarget {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2> for CastTarget {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Lifecycle phase of a session. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Line is in the water, bite timer running
    Waiting,
    /// Fish is hooked and fighting
    Caught,
    /// Terminal; the session is discarded right after notification
    Resolved,
}

/// Why a session failed naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Bite timer ran out
    NoBite,
    /// Stress ratio reached the break threshold
    LineBroke,
}

/// Why a session was aborted from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    /// Explicit cancel input (Escape)
    UserCancelled,
    /// The equipped tool stopped being a fishing rod
    RodUnequipped,
    /// Player moved beyond break distance while waiting for a bite
    PlayerWalkedAway,
}

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Fish landed. `loot_hint` is advisory only.
    Success { loot_hint: Vec<String> },
    Failure(FailureReason),
    Cancelled(CancelReason),
}

impl SessionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SessionOutcome::Success { .. })
    }

    /// Message suitable for a status line.
    pub fn message(&self) -> &'static str {
        match self {
            SessionOutcome::Success { .. } => "Caught a fish!",
            SessionOutcome::Failure(FailureReason::NoBite) => "Nothing is biting...",
            SessionOutcome::Failure(FailureReason::LineBroke) => "The line broke!",
            SessionOutcome::Cancelled(CancelReason::UserCancelled) => "Reeled in the empty line.",
            SessionOutcome::Cancelled(CancelReason::RodUnequipped) => "Put the rod away.",
            SessionOutcome::Cancelled(CancelReason::PlayerWalkedAway) => {
                "Walked too far from the line."
            }
        }
    }
}

/// The end of the line: in the water while waiting, the hooked fish while
/// fighting.
#[derive(Debug, Clone, PartialEq)]
pub struct Bobber {
    pub position: Vec2,
    /// +1.0 or -1.0: which side of the player->bobber line the next sweep targets
    pub direction_sign: f64,
    /// Fight clock time (ms) of the last zig-zag target change
    pub last_direction_change_ms: u64,
    /// Current sweep destination, chosen on the first fight step
    pub zigzag_target: Option<Vec2>,
    pub reached_target: bool,
}

impl Bobber {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            direction_sign: 1.0,
            last_direction_change_ms: 0,
            zigzag_target: None,
            reached_target: false,
        }
    }
}

/// The single active fishing session.
#[derive(Debug, Clone)]
pub struct FishingSession {
    pub phase: Phase,
    /// Player position at cast time
    pub cast_origin: Vec2,
    pub cast_target: CastTarget,
    /// Fixed at cast time; drives the bite multiplier and reel progress
    pub cast_distance: f64,
    /// Derived once from `cast_distance`
    pub distance_multiplier: f64,
    /// Bite timer elapsed, advanced in fixed bite-check increments
    pub bite_elapsed_ms: u64,
    pub bite_timer_ms: u64,
    /// Fight clock, advanced in fixed fight-tick increments
    pub fight_elapsed_ms: u64,
    pub bobber: Bobber,
    /// 0-100: share of `cast_distance` recovered by reeling
    pub reel_progress: f64,
    /// Reel inputs received since the last fight step
    pub pending_reels: u32,
    /// Number of bursts triggered during the fight
    pub bursts: u32,
}

impl FishingSession {
    pub fn new(
        cast_origin: Vec2,
        cast_target: CastTarget,
        distance_multiplier: f64,
        bite_timer_ms: u64,
    ) -> Self {
        Self {
            phase: Phase::Waiting,
            cast_origin,
            cast_target,
            cast_distance: cast_origin.distance(cast_target.position()),
            distance_multiplier,
            bite_elapsed_ms: 0,
            bite_timer_ms,
            fight_elapsed_ms: 0,
            bobber: Bobber::new(cast_target.position()),
            reel_progress: 0.0,
            pending_reels: 0,
            bursts: 0,
        }
    }

    /// Bite timer progress, 0-100.
    pub fn timer_percent(&self) -> f64 {
        if self.bite_timer_ms == 0 {
            return 100.0;
        }
        (self.bite_elapsed_ms as f64 / self.bite_timer_ms as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Read-only view of the active session for driving a progress UI.
#[derive(Debug, Clone, PartialEq)]
pub struct FishingSnapshot {
    pub phase: Phase,
    pub stress_ratio: f64,
    pub timer_percent: f64,
    pub reel_percent: f64,
    pub bobber: Vec2,
    pub cast_target: CastTarget,
    pub zigzag_target: Option<Vec2>,
}
