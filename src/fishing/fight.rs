//! Fight simulation: line stress, zig-zag swimming, drift and bursts.
//!
//! One call to [`step_fight`] is one fixed fight tick. Within a tick the
//! order is fixed:
//! 1. stress check (a snapped line wins over everything else)
//! 2. queued reel inputs
//! 3. zig-zag movement, drift away from the player, random bursts
//! 4. water containment (a step onto land is discarded for this tick)

use rand::Rng;
use std::f64::consts::TAU;

use super::reel::{apply_reel, ReelResult};
use super::types::{Bobber, FishingSession};
use crate::config::FishingConstants;
use crate::core::Vec2;
use crate::world::WaterQuery;

/// Outcome of one fight tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightStep {
    Continue,
    LineBroke,
    Landed,
}

/// Current line tension: player-to-bobber distance over the break distance.
pub fn stress_ratio(player: Vec2, bobber: Vec2, constants: &FishingConstants) -> f64 {
    player.distance(bobber) / constants.line_break_distance
}

/// Direction from the player to the bobber. Falls back to +x when they
/// coincide.
fn away_from_player(player: Vec2, bobber: Vec2) -> Vec2 {
    (bobber - player).normalized().unwrap_or(Vec2::new(1.0, 0.0))
}

/// Runs one fixed fight tick.
pub fn step_fight<W: WaterQuery + ?Sized, R: Rng>(
    session: &mut FishingSession,
    player: Vec2,
    water: &W,
    constants: &FishingConstants,
    rng: &mut R,
) -> FightStep {
    session.fight_elapsed_ms += constants.fight_tick_ms;

    let stress = stress_ratio(player, session.bobber.position, constants);
    if stress >= constants.line_break_threshold {
        session.pending_reels = 0;
        log::debug!(
            "Line snapped at stress {:.3} after {}ms",
            stress,
            session.fight_elapsed_ms
        );
        return FightStep::LineBroke;
    }

    while session.pending_reels > 0 {
        session.pending_reels -= 1;
        if apply_reel(session, player, water, constants) == ReelResult::Landed {
            session.pending_reels = 0;
            return FightStep::Landed;
        }
    }

    move_fish(session, player, water, constants, rng);
    FightStep::Continue
}

/// True when the fish should start a new sweep: it arrived at its target,
/// or the direction-change interval passed and it is close to the target.
fn needs_new_target(bobber: &mut Bobber, now_ms: u64, constants: &FishingConstants) -> bool {
    let Some(target) = bobber.zigzag_target else {
        return true;
    };
    let dist = bobber.position.distance(target);
    if dist <= constants.zigzag_arrival_radius {
        bobber.reached_target = true;
    }
    let interval_elapsed = now_ms.saturating_sub(bobber.last_direction_change_ms)
        >= constants.direction_change_interval_ms;
    bobber.reached_target || (interval_elapsed && dist <= constants.zigzag_near_radius)
}

/// Picks the next sweep target perpendicular to the player->bobber line,
/// alternating sides.
fn choose_zigzag_target(bobber: &mut Bobber, player: Vec2, now_ms: u64, constants: &FishingConstants) {
    let away = away_from_player(player, bobber.position);
    bobber.direction_sign = -bobber.direction_sign;
    bobber.zigzag_target = Some(
        bobber.position + away.perpendicular() * (constants.zigzag_sweep_distance * bobber.direction_sign),
    );
    bobber.last_direction_change_ms = now_ms;
    bobber.reached_target = false;
}

fn move_fish<W: WaterQuery + ?Sized, R: Rng>(
    session: &mut FishingSession,
    player: Vec2,
    water: &W,
    constants: &FishingConstants,
    rng: &mut R,
) {
    let now = session.fight_elapsed_ms;
    let dt = constants.fight_tick_ms as f64 / 1000.0;
    let from = session.bobber.position;

    if needs_new_target(&mut session.bobber, now, constants) {
        choose_zigzag_target(&mut session.bobber, player, now, constants);
    }
    let target = session.bobber.zigzag_target.unwrap_or(from);

    let mut candidate = from.move_towards(target, constants.fish_swim_speed * dt);

    // A panicking fish pulls harder as tension rises.
    let stress = stress_ratio(player, from, constants);
    let drift_speed = constants.fish_drift_speed * (1.0 + constants.drift_stress_scale * stress);
    let drift = away_from_player(player, from) * (drift_speed * dt);
    candidate += drift;
    let mut next_target = target + drift;

    let burst = rng.gen::<f64>() < constants.burst_chance;
    if burst {
        let angle = rng.gen_range(0.0..TAU);
        next_target = from + Vec2::from_angle(angle) * constants.burst_distance;
        session.bobber.last_direction_change_ms = now;
        session.bobber.reached_target = false;
        session.bursts += 1;
        log::debug!("Fish burst toward ({:.0}, {:.0})", next_target.x, next_target.y);
    }

    if water.is_water_at(candidate) {
        session.bobber.position = candidate;
        session.bobber.zigzag_target = Some(next_target);
    } else if burst {
        session.bobber.zigzag_target = Some(next_target);
    } else {
        // Blocked by land: hold position and turn to the other side next tick.
        session.bobber.reached_target = true;
    }

    log::trace!(
        "fight step t={}ms pos=({:.1}, {:.1}) stress={:.3}",
        now,
        session.bobber.position.x,
        session.bobber.position.y,
        stress
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fishing::types::{CastTarget, Phase};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn caught_session(target: Vec2) -> FishingSession {
        let mut session = FishingSession::new(Vec2::ZERO, CastTarget::from(target), 1.0, 10_000);
        session.phase = Phase::Caught;
        session
    }

    fn open_water(_x: f64, _y: f64) -> bool {
        true
    }

    fn calm() -> FishingConstants {
        FishingConstants {
            burst_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_stress_ratio() {
        let c = FishingConstants::default();
        let s = stress_ratio(Vec2::ZERO, Vec2::new(450.0, 0.0), &c);
        assert!((s - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_line_breaks_at_threshold() {
        let c = FishingConstants::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let edge = c.line_break_distance * c.line_break_threshold + 0.001;
        let mut session = caught_session(Vec2::new(edge, 0.0));
        let before = session.bobber.position;

        let result = step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);

        assert_eq!(result, FightStep::LineBroke);
        assert_eq!(session.bobber.position, before);
    }

    #[test]
    fn test_break_takes_priority_over_queued_reel() {
        let c = FishingConstants::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut session = caught_session(Vec2::new(880.0, 0.0));
        // A reel this tick would hit the shore and land the fish
        let water = |x: f64, _y: f64| x > 870.0;
        session.pending_reels = 1;

        let result = step_fight(&mut session, Vec2::ZERO, &water, &c, &mut rng);

        assert_eq!(result, FightStep::LineBroke);
        assert_eq!(session.pending_reels, 0);
    }

    #[test]
    fn test_queued_reel_applied_in_step() {
        let c = calm();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut session = caught_session(Vec2::new(600.0, 0.0));
        session.pending_reels = 1;

        let result = step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);

        assert_eq!(result, FightStep::Continue);
        assert_eq!(session.pending_reels, 0);
        assert!(session.bobber.position.distance(Vec2::ZERO) < 600.0 - c.reel_step_distance + 5.0);
        assert!(session.reel_progress > 0.0);
    }

    #[test]
    fn test_first_step_picks_perpendicular_target() {
        let c = calm();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut session = caught_session(Vec2::new(300.0, 0.0));

        step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);

        let target = session.bobber.zigzag_target.expect("target chosen");
        // Perpendicular to the x axis, shifted outward by one tick of drift
        assert!((target.y.abs() - c.zigzag_sweep_distance).abs() < 1e-9);
        assert!(target.x > 300.0 && target.x < 301.0);
    }

    #[test]
    fn test_sweeps_alternate_sides() {
        let c = calm();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut session = caught_session(Vec2::new(300.0, 0.0));

        step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);
        let first_side = session.bobber.direction_sign;

        let mut switched = false;
        for _ in 0..200 {
            step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);
            if session.bobber.direction_sign != first_side {
                switched = true;
                break;
            }
        }
        assert!(switched, "fish should start a sweep on the other side");
    }

    #[test]
    fn test_timer_alone_does_not_abandon_far_sweep() {
        let c = calm();
        let mut bobber = Bobber::new(Vec2::new(300.0, 0.0));
        bobber.zigzag_target = Some(Vec2::new(300.0, 55.0));
        bobber.last_direction_change_ms = 0;

        let now = c.direction_change_interval_ms * 3;
        assert!(!needs_new_target(&mut bobber, now, &c));

        bobber.position = Vec2::new(300.0, 40.0);
        assert!(needs_new_target(&mut bobber, now, &c));
    }

    #[test]
    fn test_drift_moves_fish_away_from_player() {
        let c = FishingConstants {
            burst_chance: 0.0,
            fish_swim_speed: 0.0001,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut session = caught_session(Vec2::new(300.0, 0.0));

        let mut last = session.bobber.position.distance(Vec2::ZERO);
        for _ in 0..50 {
            step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);
            let d = session.bobber.position.distance(Vec2::ZERO);
            assert!(d > last);
            last = d;
        }
    }

    #[test]
    fn test_burst_retargets_at_burst_distance() {
        let c = FishingConstants {
            burst_chance: 1.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut session = caught_session(Vec2::new(300.0, 0.0));
        let from = session.bobber.position;

        step_fight(&mut session, Vec2::ZERO, &open_water, &c, &mut rng);

        let target = session.bobber.zigzag_target.expect("burst target");
        assert!((from.distance(target) - c.burst_distance).abs() < 1e-9);
        assert_eq!(session.bursts, 1);
    }

    #[test]
    fn test_land_step_is_rejected() {
        let c = calm();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut session = caught_session(Vec2::new(300.0, 0.0));
        // Only the bobber's exact starting point counts as water
        let water = |x: f64, y: f64| x == 300.0 && y == 0.0;

        for _ in 0..20 {
            let result = step_fight(&mut session, Vec2::ZERO, &water, &c, &mut rng);
            assert_eq!(result, FightStep::Continue);
            assert_eq!(session.bobber.position, Vec2::new(300.0, 0.0));
        }
    }
}
