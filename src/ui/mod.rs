pub mod common;
pub mod fishing_scene;

pub use fishing_scene::Viewport;

use crate::app::App;
use angler::core::Vec2;
use ratatui::{layout::Rect, Frame};

/// Main UI drawing function
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.size();
    fishing_scene::render_fishing_scene(frame, size, app);
}

/// Viewport of the map for a terminal of the given size.
pub fn viewport_for(size: Rect, world: Vec2) -> Viewport {
    let layout = common::compute_game_layout(size, fishing_scene::INFO_PANEL_WIDTH);
    Viewport::new(layout.content, world)
}
