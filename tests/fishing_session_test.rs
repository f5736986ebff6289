//! Fishing session integration tests
//!
//! End-to-end tests driving `FishingEngine` the way a host does, covering:
//! - Near vs. far cast bite rates
//! - Line breaking when the player never reels
//! - Landing a fish by reeling
//! - Cancels, unequips and walking away
//! - Water containment and exactly-once authority notification

use angler::authority::{AuthorityCommand, RecordingAuthority};
use angler::config::FishingConstants;
use angler::core::Vec2;
use angler::fishing::bite::{bite_probability, distance_multiplier};
use angler::fishing::{
    CancelReason, FailureReason, FishingEngine, Phase, Resolution, SessionOutcome,
};
use angler::world::{TileMap, WaterQuery};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn open_water(_x: f64, _y: f64) -> bool {
    true
}

fn create_test_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn create_engine(constants: FishingConstants) -> FishingEngine<RecordingAuthority> {
    let mut engine = FishingEngine::new(constants, RecordingAuthority::new());
    engine.set_rod_equipped(true);
    engine
}

/// Bites on the first check for a full-range cast.
fn hooked_constants() -> FishingConstants {
    FishingConstants {
        bite_base_chance: 1.0,
        ..Default::default()
    }
}

/// Drives 16ms frames until the session resolves or `max_ms` passes.
fn run_frames<W: WaterQuery + ?Sized>(
    engine: &mut FishingEngine<RecordingAuthority>,
    player: Vec2,
    water: &W,
    rng: &mut ChaCha8Rng,
    max_ms: u64,
    reel_every_frame: bool,
) -> Option<Resolution> {
    let mut elapsed = 0;
    while elapsed < max_ms {
        if reel_every_frame {
            engine.on_reel();
        }
        if let Some(resolution) = engine.update(16, player, water, rng) {
            return Some(resolution);
        }
        elapsed += 16;
    }
    None
}

/// Casts from the origin along +x and waits until the fish bites.
fn cast_and_hook(
    engine: &mut FishingEngine<RecordingAuthority>,
    distance: f64,
    rng: &mut ChaCha8Rng,
) {
    engine
        .on_primary_click(Vec2::ZERO, Vec2::new(distance, 0.0), &open_water)
        .expect("cast onto open water");
    for _ in 0..4 {
        engine.update(100, Vec2::ZERO, &open_water, rng);
    }
    assert_eq!(engine.phase(), Some(Phase::Caught));
}

// ============================================================================
// Bite Rate Tests
// ============================================================================

/// Fraction of `sessions` casts at `distance` that get a bite before the
/// timer runs out.
fn bite_rate(distance: f64, sessions: u32, seed: u64) -> f64 {
    let mut rng = create_test_rng(seed);
    let mut engine = create_engine(FishingConstants::default());
    let mut bites = 0;

    for _ in 0..sessions {
        engine
            .on_primary_click(Vec2::ZERO, Vec2::new(distance, 0.0), &open_water)
            .expect("cast onto open water");
        loop {
            if engine.update(100, Vec2::ZERO, &open_water, &mut rng).is_some() {
                break;
            }
            if engine.phase() == Some(Phase::Caught) {
                bites += 1;
                engine.cancel();
                break;
            }
        }
    }
    bites as f64 / sessions as f64
}

#[test]
fn test_shoreline_cast_rarely_bites() {
    let rate = bite_rate(0.0, 1000, 100);
    assert!(rate < 0.45, "shoreline bite rate too high: {rate}");
}

#[test]
fn test_full_range_cast_usually_bites() {
    let far = bite_rate(FishingConstants::default().cast_range, 1000, 200);
    let near = bite_rate(0.0, 1000, 200);
    assert!(far > 0.9, "full range bite rate too low: {far}");
    assert!(far > near + 0.4);
}

#[test]
fn test_bite_curves_are_monotonic() {
    let c = FishingConstants::default();
    let mut prev_multiplier = 0.0;
    for step in 0..=12 {
        let m = distance_multiplier(step as f64 * 50.0, &c);
        assert!(m >= prev_multiplier);
        prev_multiplier = m;

        let mut prev_p = 0.0;
        for check in 0..=c.bite_checks_per_timer() {
            let t = check as f64 / c.bite_checks_per_timer() as f64;
            let p = bite_probability(t, m, &c);
            assert!(p >= prev_p);
            prev_p = p;
        }
    }
}

#[test]
fn test_timer_expiry_fails_with_no_bite() {
    let mut rng = create_test_rng(1);
    let mut engine = create_engine(FishingConstants {
        bite_base_chance: 0.0,
        ..Default::default()
    });
    engine
        .on_primary_click(Vec2::ZERO, Vec2::new(300.0, 0.0), &open_water)
        .unwrap();

    let resolution = run_frames(&mut engine, Vec2::ZERO, &open_water, &mut rng, 11_000, false)
        .expect("timer expires");

    assert_eq!(
        resolution.outcome,
        SessionOutcome::Failure(FailureReason::NoBite)
    );
    assert_eq!(resolution.duration_ms, 10_000);
    assert_eq!(
        engine.authority().last(),
        Some(&AuthorityCommand::FinishFishing {
            success: false,
            loot_hint: vec![]
        })
    );
}

// ============================================================================
// Fight Tests
// ============================================================================

#[test]
fn test_idle_fight_breaks_line() {
    let mut rng = create_test_rng(2);
    let mut engine = create_engine(hooked_constants());
    cast_and_hook(&mut engine, 600.0, &mut rng);

    let resolution = run_frames(&mut engine, Vec2::ZERO, &open_water, &mut rng, 120_000, false)
        .expect("drifting fish snaps the line");

    assert_eq!(
        resolution.outcome,
        SessionOutcome::Failure(FailureReason::LineBroke)
    );
    assert!(!engine.is_active());
}

#[test]
fn test_reeling_lands_fish_in_open_water() {
    let mut rng = create_test_rng(3);
    let mut engine = create_engine(hooked_constants());
    cast_and_hook(&mut engine, 600.0, &mut rng);

    let resolution = run_frames(&mut engine, Vec2::ZERO, &open_water, &mut rng, 30_000, true)
        .expect("steady reeling lands the fish");

    assert!(resolution.outcome.is_success());
    assert_eq!(
        engine.authority().last(),
        Some(&AuthorityCommand::FinishFishing {
            success: true,
            loot_hint: vec![]
        })
    );
}

#[test]
fn test_snapped_line_beats_reel_in_same_tick() {
    // Break distance just above the cast range so the hooked fish is already
    // past the threshold, with the shore right in front of it.
    let constants = FishingConstants {
        bite_base_chance: 1.0,
        line_break_distance: 620.0,
        ..Default::default()
    };
    let shore = |x: f64, _y: f64| x > 580.0;
    let mut rng = create_test_rng(4);
    let mut engine = create_engine(constants);
    engine
        .on_primary_click(Vec2::ZERO, Vec2::new(595.0, 0.0), &shore)
        .unwrap();
    engine.update(100, Vec2::ZERO, &shore, &mut rng);
    engine.update(100, Vec2::ZERO, &shore, &mut rng);
    assert_eq!(engine.phase(), Some(Phase::Caught));

    assert!(engine.on_reel());
    let resolution = engine
        .update(16, Vec2::ZERO, &shore, &mut rng)
        .expect("resolves this tick");

    assert_eq!(
        resolution.outcome,
        SessionOutcome::Failure(FailureReason::LineBroke)
    );
}

#[test]
fn test_bobber_stays_on_water_strip() {
    let map = TileMap::from_rows(
        &[
            "........................................",
            "........................................",
            "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~",
            "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~",
            "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~",
            "........................................",
        ],
        32.0,
    );
    let player = map.tile_center(20, 0);
    let target = map.tile_center(20, 3);
    let constants = FishingConstants {
        bite_base_chance: 1.0,
        burst_chance: 0.05,
        ..Default::default()
    };
    let mut rng = create_test_rng(5);
    let mut engine = create_engine(constants);
    engine.on_primary_click(player, target, &map).unwrap();

    let mut fight_frames = 0;
    for _ in 0..3000 {
        if engine.update(16, player, &map, &mut rng).is_some() {
            break;
        }
        if let Some(snap) = engine.snapshot(player) {
            if snap.phase == Phase::Caught {
                fight_frames += 1;
                assert!(
                    map.is_water_at(snap.bobber),
                    "bobber left the water at {:?}",
                    snap.bobber
                );
            }
        }
    }
    assert!(fight_frames > 100);
}

// ============================================================================
// Cancel and Notification Tests
// ============================================================================

#[test]
fn test_cancel_while_waiting_stops_bite_checks() {
    let mut rng = create_test_rng(6);
    let mut engine = create_engine(FishingConstants::default());
    engine
        .on_primary_click(Vec2::ZERO, Vec2::new(400.0, 0.0), &open_water)
        .unwrap();
    engine.update(100, Vec2::ZERO, &open_water, &mut rng);

    let resolution = engine.cancel().expect("session cancelled");
    assert_eq!(
        resolution.outcome,
        SessionOutcome::Cancelled(CancelReason::UserCancelled)
    );

    for _ in 0..200 {
        assert!(engine.update(100, Vec2::ZERO, &open_water, &mut rng).is_none());
    }
    assert!(engine.phase().is_none());
    assert_eq!(
        engine.authority().commands,
        vec![
            AuthorityCommand::CastFishingLine {
                world_x: 400.0,
                world_y: 0.0
            },
            AuthorityCommand::CancelFishing,
        ]
    );
}

#[test]
fn test_exactly_one_terminal_call_per_session() {
    let mut rng = create_test_rng(7);
    let mut engine = create_engine(hooked_constants());

    // Landed
    cast_and_hook(&mut engine, 600.0, &mut rng);
    run_frames(&mut engine, Vec2::ZERO, &open_water, &mut rng, 30_000, true).unwrap();
    // Snapped
    cast_and_hook(&mut engine, 600.0, &mut rng);
    run_frames(&mut engine, Vec2::ZERO, &open_water, &mut rng, 120_000, false).unwrap();
    // Cancelled
    engine
        .on_primary_click(Vec2::ZERO, Vec2::new(600.0, 0.0), &open_water)
        .unwrap();
    engine.cancel().unwrap();

    // Pile on inputs after every session ended
    for _ in 0..50 {
        engine.update(100, Vec2::ZERO, &open_water, &mut rng);
        engine.on_reel();
        engine.cancel();
    }
    engine.set_rod_equipped(false);

    assert_eq!(engine.sessions_started(), 3);
    assert_eq!(engine.authority().terminal_count(), 3);
}

#[test]
fn test_rod_unequipped_mid_fight_cancels() {
    let mut rng = create_test_rng(8);
    let mut engine = create_engine(hooked_constants());
    cast_and_hook(&mut engine, 600.0, &mut rng);

    let resolution = engine.set_rod_equipped(false).expect("fight cancelled");

    assert_eq!(
        resolution.outcome,
        SessionOutcome::Cancelled(CancelReason::RodUnequipped)
    );
    assert_eq!(
        engine.authority().last(),
        Some(&AuthorityCommand::CancelFishing)
    );
}

#[test]
fn test_walking_away_while_waiting_resolves_same_tick() {
    let mut rng = create_test_rng(9);
    let mut engine = create_engine(FishingConstants {
        bite_base_chance: 1.0,
        ..Default::default()
    });
    engine
        .on_primary_click(Vec2::ZERO, Vec2::new(600.0, 0.0), &open_water)
        .unwrap();

    // Still in range: a short frame does nothing
    assert!(engine.update(16, Vec2::ZERO, &open_water, &mut rng).is_none());

    // 1000 units from the bobber, beyond the break distance
    let walked = Vec2::new(-400.0, 0.0);
    let resolution = engine
        .update(16, walked, &open_water, &mut rng)
        .expect("the frame that crosses the break distance ends the session");

    assert_eq!(
        resolution.outcome,
        SessionOutcome::Cancelled(CancelReason::PlayerWalkedAway)
    );
    assert!(engine.phase().is_none());
    assert_eq!(engine.authority().terminal_count(), 1);
}

#[test]
fn test_walking_away_while_fighting_snaps_line() {
    let mut rng = create_test_rng(10);
    let mut engine = create_engine(hooked_constants());
    cast_and_hook(&mut engine, 600.0, &mut rng);

    let resolution = engine
        .update(16, Vec2::new(-400.0, 0.0), &open_water, &mut rng)
        .expect("snaps on the next fight tick");

    assert_eq!(
        resolution.outcome,
        SessionOutcome::Failure(FailureReason::LineBroke)
    );
}
