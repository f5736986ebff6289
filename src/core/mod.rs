//! Shared constants and geometry.

pub mod constants;
pub mod geometry;

pub use geometry::Vec2;
