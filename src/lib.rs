//! Angler - client-side fishing minigame engine
//!
//! This module exposes the engine, its configuration and the headless
//! simulator for testing and external use. The terminal host lives in the
//! `angler` binary.

pub mod authority;
pub mod build_info;
pub mod config;
pub mod core;
pub mod error;
pub mod fishing;
pub mod simulator;
pub mod world;
