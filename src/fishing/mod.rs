//! Fishing minigame: targeting, bite timing, fight and reel, tied together by
//! the engine.

pub mod bite;
pub mod engine;
pub mod fight;
pub mod reel;
pub mod targeting;
pub mod types;

pub use engine::{FishingEngine, Resolution};
pub use targeting::CastTargeting;
pub use types::{
    Bobber, CancelReason, CastTarget, FailureReason, FishingSession, FishingSnapshot, Phase,
    SessionOutcome,
};
