//! Fishing balance simulator for Monte Carlo analysis.
//!
//! Runs thousands of scripted sessions to analyze:
//! - Bite rates for near vs. far casts
//! - How often the line breaks for a given reel cadence
//! - Time to bite and fight duration
//!
//! The simulator drives `FishingEngine` itself, so results match real play.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunOutcome, RunStats};
