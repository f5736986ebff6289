//! Reel action: pulls the hooked fish a fixed step toward the player.

use super::types::FishingSession;
use crate::config::FishingConstants;
use crate::core::Vec2;
use crate::world::WaterQuery;

/// Result of applying one reel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelResult {
    /// Bobber moved one step closer; the fight continues
    Moved,
    /// The fish is landed; the bobber stays where it was
    Landed,
}

/// Share of the original cast distance recovered, given the current
/// player-to-bobber distance. Negative when the fish is farther out than the
/// original cast.
pub fn recovered_fraction(cast_distance: f64, current_distance: f64) -> f64 {
    if cast_distance <= f64::EPSILON {
        return 1.0;
    }
    (cast_distance - current_distance) / cast_distance
}

/// Applies one reel step.
///
/// The fish is landed without moving when any of these hold:
/// - the remaining distance to the player is shorter than one step,
/// - any sampled point along the step lies on land (shore reached),
/// - the step would recover at least `reel_success_fraction` of the cast.
pub fn apply_reel<W: WaterQuery + ?Sized>(
    session: &mut FishingSession,
    player: Vec2,
    water: &W,
    constants: &FishingConstants,
) -> ReelResult {
    let from = session.bobber.position;
    let remaining = from.distance(player);

    if remaining < constants.reel_step_distance {
        session.reel_progress = 100.0;
        return ReelResult::Landed;
    }

    let candidate = from.move_towards(player, constants.reel_step_distance);

    let samples = constants.reel_path_samples.max(1);
    let hits_shore = (1..=samples)
        .map(|i| from.lerp(candidate, i as f64 / samples as f64))
        .any(|p| !water.is_water_at(p));
    if hits_shore {
        session.reel_progress = 100.0;
        return ReelResult::Landed;
    }

    let recovered = recovered_fraction(session.cast_distance, candidate.distance(player));
    if recovered >= constants.reel_success_fraction {
        session.reel_progress = 100.0;
        return ReelResult::Landed;
    }

    // The sweep travels with the fish so it does not swim back out.
    let pulled = candidate - from;
    session.bobber.position = candidate;
    if let Some(target) = session.bobber.zigzag_target {
        session.bobber.zigzag_target = Some(target + pulled);
    }
    session.reel_progress = (recovered * 100.0).clamp(0.0, 100.0);
    ReelResult::Moved
}
