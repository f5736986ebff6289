//! Fishing engine: owns cast targeting, the single active session and the
//! fixed-step clock, and reports every terminal outcome to the authority.
//!
//! The host drives it from its update loop:
//! - pointer samples and clicks before a cast,
//! - reel and cancel inputs at any time,
//! - `update(dt_ms, ...)` once per frame.
//!
//! Frame time is clamped to `max_frame_ms`, accumulated, and consumed in
//! fixed bite-check (Waiting) or fight-tick (Caught) increments, so the
//! simulation is independent of the host frame rate.

use rand::Rng;

use super::bite::{distance_multiplier, player_walked_away, step_waiting, WaitingStep};
use super::fight::{step_fight, stress_ratio, FightStep};
use super::targeting::CastTargeting;
use super::types::{
    CancelReason, CastTarget, FailureReason, FishingSession, FishingSnapshot, Phase,
    SessionOutcome,
};
use crate::authority::FishingAuthority;
use crate::config::FishingConstants;
use crate::core::Vec2;
use crate::error::{AuthorityError, CastRejected};
use crate::world::WaterQuery;

/// What the host receives when a session ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub outcome: SessionOutcome,
    pub cast_target: CastTarget,
    /// Simulated time spent waiting plus fighting
    pub duration_ms: u64,
    /// Set when the terminal notification failed. The outcome still stands;
    /// retrying is up to the host.
    pub authority_error: Option<AuthorityError>,
}

/// Client-side fishing minigame for one player.
#[derive(Debug)]
pub struct FishingEngine<A: FishingAuthority> {
    constants: FishingConstants,
    authority: A,
    targeting: CastTargeting,
    session: Option<FishingSession>,
    rod_equipped: bool,
    /// Sub-step time accumulator (milliseconds)
    accumulated_ms: u64,
    last_resolution: Option<Resolution>,
    sessions_started: u64,
}

impl<A: FishingAuthority> FishingEngine<A> {
    pub fn new(constants: FishingConstants, authority: A) -> Self {
        Self {
            constants,
            authority,
            targeting: CastTargeting::new(),
            session: None,
            rod_equipped: false,
            accumulated_ms: 0,
            last_resolution: None,
            sessions_started: 0,
        }
    }

    pub fn constants(&self) -> &FishingConstants {
        &self.constants
    }

    pub fn authority(&self) -> &A {
        &self.authority
    }

    pub fn authority_mut(&mut self) -> &mut A {
        &mut self.authority
    }

    pub fn session(&self) -> Option<&FishingSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Option<Phase> {
        self.session.as_ref().map(|s| s.phase)
    }

    pub fn rod_equipped(&self) -> bool {
        self.rod_equipped
    }

    pub fn targeting(&self) -> &CastTargeting {
        &self.targeting
    }

    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    pub fn sessions_started(&self) -> u64 {
        self.sessions_started
    }

    /// Host signal: whether the equipped tool can fish. Unequipping during a
    /// session cancels it.
    pub fn set_rod_equipped(&mut self, equipped: bool) -> Option<Resolution> {
        self.rod_equipped = equipped;
        if equipped {
            return None;
        }
        self.targeting.reset();
        self.resolve(SessionOutcome::Cancelled(CancelReason::RodUnequipped))
    }

    /// Pointer sample. Returns whether the pointer is on a valid target;
    /// always false while a session is active.
    pub fn on_pointer_move<W: WaterQuery + ?Sized>(
        &mut self,
        player: Vec2,
        pointer: Vec2,
        water: &W,
    ) -> bool {
        if self.session.is_some() {
            return false;
        }
        self.targeting
            .on_pointer_move(player, pointer, water, &self.constants)
    }

    /// Primary click. On success the session starts and the authority is
    /// told about the cast.
    pub fn on_primary_click<W: WaterQuery + ?Sized>(
        &mut self,
        player: Vec2,
        pointer: Vec2,
        water: &W,
    ) -> Result<CastTarget, CastRejected> {
        if self.session.is_some() {
            return Err(CastRejected::SessionActive);
        }
        let target = self.targeting.on_primary_click(
            self.rod_equipped,
            player,
            pointer,
            water,
            &self.constants,
        )?;
        self.start_session(player, target);
        Ok(target)
    }

    fn start_session(&mut self, player: Vec2, target: CastTarget) {
        let cast_distance = player.distance(target.position());
        let multiplier = distance_multiplier(cast_distance, &self.constants);
        let session =
            FishingSession::new(player, target, multiplier, self.constants.bite_timer_ms);

        self.sessions_started += 1;
        self.accumulated_ms = 0;
        self.targeting.reset();

        log::info!(
            "Session #{}: cast to ({:.0}, {:.0}), distance {:.0}, bite multiplier {:.2}",
            self.sessions_started,
            target.x,
            target.y,
            cast_distance,
            multiplier
        );
        if let Err(e) = self.authority.cast_fishing_line(target.x, target.y) {
            log::warn!("castFishingLine notification failed: {}", e);
        }
        self.session = Some(session);
    }

    /// Reel input. Queued and applied on the next fight tick, after the
    /// stress check. Ignored unless a fish is hooked.
    pub fn on_reel(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) if session.phase == Phase::Caught => {
                session.pending_reels += 1;
                true
            }
            _ => false,
        }
    }

    /// Explicit cancel (e.g. Escape). No-op without an active session.
    pub fn cancel(&mut self) -> Option<Resolution> {
        self.resolve(SessionOutcome::Cancelled(CancelReason::UserCancelled))
    }

    /// Advances the active session by `dt_ms` of host time.
    ///
    /// Returns the resolution if the session ended during this call. Once a
    /// session resolves no further steps run, even if time remains in the
    /// accumulator.
    pub fn update<W: WaterQuery + ?Sized, R: Rng>(
        &mut self,
        dt_ms: u64,
        player: Vec2,
        water: &W,
        rng: &mut R,
    ) -> Option<Resolution> {
        let mut session = self.session.take()?;

        // Walking away ends a wait on the frame it happens, not at the next bite check.
        if session.phase == Phase::Waiting && player_walked_away(&session, player, &self.constants)
        {
            let outcome = SessionOutcome::Cancelled(CancelReason::PlayerWalkedAway);
            return Some(self.finish(session, outcome));
        }

        self.accumulated_ms += dt_ms.min(self.constants.max_frame_ms);

        loop {
            let step_ms = match session.phase {
                Phase::Waiting => self.constants.bite_check_interval_ms,
                Phase::Caught => self.constants.fight_tick_ms,
                Phase::Resolved => break,
            };
            if self.accumulated_ms < step_ms {
                break;
            }
            self.accumulated_ms -= step_ms;

            let outcome = match session.phase {
                Phase::Waiting => match step_waiting(&mut session, player, &self.constants, rng) {
                    WaitingStep::Continue => None,
                    WaitingStep::Bite => {
                        // The fight clock starts fresh at the bite.
                        self.accumulated_ms = 0;
                        None
                    }
                    WaitingStep::TimedOut => Some(SessionOutcome::Failure(FailureReason::NoBite)),
                    WaitingStep::PlayerWalkedAway => {
                        Some(SessionOutcome::Cancelled(CancelReason::PlayerWalkedAway))
                    }
                },
                Phase::Caught => {
                    match step_fight(&mut session, player, water, &self.constants, rng) {
                        FightStep::Continue => None,
                        FightStep::LineBroke => {
                            Some(SessionOutcome::Failure(FailureReason::LineBroke))
                        }
                        FightStep::Landed => Some(SessionOutcome::Success {
                            loot_hint: Vec::new(),
                        }),
                    }
                }
                Phase::Resolved => None,
            };

            if let Some(outcome) = outcome {
                return Some(self.finish(session, outcome));
            }
        }

        self.session = Some(session);
        None
    }

    /// Read-only progress view of the active session.
    pub fn snapshot(&self, player: Vec2) -> Option<FishingSnapshot> {
        self.session.as_ref().map(|s| FishingSnapshot {
            phase: s.phase,
            stress_ratio: stress_ratio(player, s.bobber.position, &self.constants),
            timer_percent: s.timer_percent(),
            reel_percent: s.reel_progress,
            bobber: s.bobber.position,
            cast_target: s.cast_target,
            zigzag_target: s.bobber.zigzag_target,
        })
    }

    fn resolve(&mut self, outcome: SessionOutcome) -> Option<Resolution> {
        let session = self.session.take()?;
        Some(self.finish(session, outcome))
    }

    /// Marks the session resolved, notifies the authority exactly once and
    /// discards the session.
    fn finish(&mut self, mut session: FishingSession, outcome: SessionOutcome) -> Resolution {
        session.phase = Phase::Resolved;
        self.accumulated_ms = 0;

        let notified = match &outcome {
            SessionOutcome::Success { loot_hint } => self.authority.finish_fishing(true, loot_hint),
            SessionOutcome::Failure(_) => self.authority.finish_fishing(false, &[]),
            SessionOutcome::Cancelled(_) => self.authority.cancel_fishing(),
        };

        log::info!(
            "Session #{} resolved: {:?} after {}ms waiting, {}ms fighting",
            self.sessions_started,
            outcome,
            session.bite_elapsed_ms,
            session.fight_elapsed_ms
        );
        let authority_error = notified.err();
        if let Some(e) = &authority_error {
            log::warn!("Terminal notification failed, result stays final: {}", e);
        }

        let resolution = Resolution {
            outcome,
            cast_target: session.cast_target,
            duration_ms: session.bite_elapsed_ms + session.fight_elapsed_ms,
            authority_error,
        };
        self.last_resolution = Some(resolution.clone());
        resolution
    }
}
