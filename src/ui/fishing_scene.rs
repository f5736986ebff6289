//! Fishing scene rendering.
//!
//! Renders the lake, the player, the cast-range ring and pointer indicator,
//! the line and bobber, plus the line gauges and authority log, using a cell
//! buffer approach.

use super::common::{
    create_game_layout, danger_color, percent_bar, render_info_panel_frame, render_status_bar,
};
use crate::app::App;
use angler::core::Vec2;
use angler::fishing::{FishingSnapshot, Phase};
use angler::world::WaterQuery;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub const INFO_PANEL_WIDTH: u16 = 30;

/// Maps between terminal cells of the map area and world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub world: Vec2,
}

impl Viewport {
    pub fn new(area: Rect, world: Vec2) -> Self {
        Self { area, world }
    }

    /// World units per cell (x, y)
    fn scale(&self) -> (f64, f64) {
        (
            self.world.x / self.area.width.max(1) as f64,
            self.world.y / self.area.height.max(1) as f64,
        )
    }

    /// World position at the centre of the cell at (col, row) inside the area.
    fn cell_center(&self, col: u16, row: u16) -> Vec2 {
        let (sx, sy) = self.scale();
        Vec2::new((col as f64 + 0.5) * sx, (row as f64 + 0.5) * sy)
    }

    /// Terminal cell to world position; None outside the map area.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        let a = self.area;
        if column < a.x || row < a.y || column >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        Some(self.cell_center(column - a.x, row - a.y))
    }

    /// World position to a cell offset inside the area.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let (sx, sy) = self.scale();
        let col = (p.x / sx) as u16;
        let row = (p.y / sy) as u16;
        (col < self.area.width && row < self.area.height).then_some((col, row))
    }
}

/// Render the fishing screen.
pub fn render_fishing_scene(frame: &mut Frame, area: Rect, app: &App) {
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 16;
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!("Terminal too small ({}x{} needed)", MIN_WIDTH, MIN_HEIGHT);
        frame.render_widget(Paragraph::new(msg).alignment(Alignment::Center), area);
        return;
    }

    let layout = create_game_layout(frame, area, " Angler ", Color::LightBlue, INFO_PANEL_WIDTH);
    let viewport = Viewport::new(layout.content, app.map.world_size());
    let snapshot = app.engine.snapshot(app.player);

    render_map(frame, &viewport, app, snapshot.as_ref());
    render_status_bar_content(frame, layout.status_bar, app, snapshot.as_ref());
    render_info_panel(frame, layout.info_panel, app, snapshot.as_ref());
}

/// Cell in the render buffer.
#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Overwrites the glyph at a world position, keeping the terrain background.
fn put(buffer: &mut [Vec<Cell>], viewport: &Viewport, p: Vec2, ch: char, fg: Color) {
    if let Some((col, row)) = viewport.to_cell(p) {
        let cell = &mut buffer[row as usize][col as usize];
        cell.ch = ch;
        cell.fg = fg;
    }
}

fn render_map(frame: &mut Frame, viewport: &Viewport, app: &App, snapshot: Option<&FishingSnapshot>) {
    let area = viewport.area;
    if area.height < 2 || area.width < 10 {
        return;
    }

    let mut buffer: Vec<Vec<Cell>> =
        vec![vec![Cell::default(); area.width as usize]; area.height as usize];
    let (sx, sy) = viewport.scale();
    let cast_range = app.engine.constants().cast_range;
    let show_range = snapshot.is_none() && app.engine.rod_equipped();

    // -- Terrain --
    for row in 0..area.height {
        for col in 0..area.width {
            let world = viewport.cell_center(col, row);
            let hash = (row as usize * 137 + col as usize * 251 + 97) % 7;
            let mut cell = if app.map.is_water_at(world) {
                Cell {
                    ch: if hash == 0 { '~' } else { ' ' },
                    fg: Color::Rgb(110, 160, 220),
                    bg: Color::Rgb(20, 50, 90),
                }
            } else {
                Cell {
                    ch: if hash == 0 { '"' } else { '.' },
                    fg: Color::Rgb(80, 120, 60),
                    bg: Color::Rgb(30, 45, 25),
                }
            };

            // Cast range ring
            if show_range && (world.distance(app.player) - cast_range).abs() <= sx.max(sy) / 2.0 {
                cell.ch = ':';
                cell.fg = Color::Gray;
            }
            buffer[row as usize][col as usize] = cell;
        }
    }

    match snapshot {
        Some(snap) => {
            // -- Line --
            let color = danger_color(snap.stress_ratio * 100.0);
            let length = app.player.distance(snap.bobber);
            let steps = (length / sx.min(sy).max(1.0)).ceil() as usize;
            for i in 1..steps {
                let p = app.player.lerp(snap.bobber, i as f64 / steps as f64);
                put(&mut buffer, viewport, p, '.', color);
            }

            if snap.phase == Phase::Caught {
                if let Some(target) = snap.zigzag_target {
                    put(&mut buffer, viewport, target, 'x', Color::DarkGray);
                }
                put(&mut buffer, viewport, snap.bobber, '&', Color::Yellow);
            } else {
                put(&mut buffer, viewport, snap.bobber, 'o', Color::Red);
            }
        }
        None => {
            // -- Pointer validity indicator --
            if let Some(pointer) = app.pointer {
                let (ch, fg) = if app.engine.targeting().is_valid_target() {
                    ('+', Color::LightGreen)
                } else {
                    ('x', Color::LightRed)
                };
                put(&mut buffer, viewport, pointer, ch, fg);
            }
        }
    }

    put(&mut buffer, viewport, app.player, '@', Color::White);

    // -- Render buffer to terminal --
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let line = Paragraph::new(Line::from(spans));
        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(line, row_area);
    }
}

/// Render the status bar below the map.
fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    snapshot: Option<&FishingSnapshot>,
) {
    let (status_color, controls): (Color, &[(&str, &str)]) = match snapshot.map(|s| s.phase) {
        Some(Phase::Caught) => (
            Color::Yellow,
            &[("[R/Right click]", "Reel"), ("[Esc]", "Cancel"), ("[Q]", "Quit")],
        ),
        Some(_) => (
            Color::LightBlue,
            &[("[WASD]", "Walk"), ("[Esc]", "Cancel"), ("[Q]", "Quit")],
        ),
        None => (
            Color::White,
            &[
                ("[Click]", "Cast"),
                ("[WASD]", "Walk"),
                ("[E]", "Rod"),
                ("[Q]", "Quit"),
            ],
        ),
    };
    render_status_bar(frame, area, &app.status, status_color, controls);
}

/// Render the info panel on the right side.
fn render_info_panel(frame: &mut Frame, area: Rect, app: &App, snapshot: Option<&FishingSnapshot>) {
    if area.width < 2 {
        return;
    }
    let inner = render_info_panel_frame(frame, area);
    let bar_width = (inner.width as usize).saturating_sub(8).min(16);
    let label = Style::default().fg(Color::DarkGray);

    let rod = if app.engine.rod_equipped() {
        Span::styled("equipped", Style::default().fg(Color::Green))
    } else {
        Span::styled("stowed", Style::default().fg(Color::DarkGray))
    };
    let mut lines = vec![Line::from(vec![Span::styled("Rod:    ", label), rod])];

    match snapshot {
        Some(snap) => {
            let phase = match snap.phase {
                Phase::Waiting => "Waiting",
                Phase::Caught => "Fish on!",
                Phase::Resolved => "Done",
            };
            lines.push(Line::from(vec![
                Span::styled("Phase:  ", label),
                Span::styled(phase, Style::default().add_modifier(Modifier::BOLD)),
            ]));
            lines.push(Line::from(""));

            lines.push(Line::from(Span::styled("Bite timer", label)));
            lines.push(Line::from(percent_bar(snap.timer_percent, bar_width)));

            let stress_pct = snap.stress_ratio * 100.0;
            lines.push(Line::from(Span::styled("Line stress", label)));
            lines.push(Line::from(Span::styled(
                percent_bar(stress_pct, bar_width),
                Style::default().fg(danger_color(stress_pct)),
            )));

            lines.push(Line::from(Span::styled("Reeled in", label)));
            lines.push(Line::from(Span::styled(
                percent_bar(snap.reel_percent, bar_width),
                Style::default().fg(Color::Cyan),
            )));
        }
        None => {
            lines.push(Line::from(vec![
                Span::styled("Phase:  ", label),
                Span::raw("Idle"),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Server",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED),
    )));
    let max = inner.width as usize;
    for entry in app.authority_log() {
        let text: String = entry.chars().take(max).collect();
        lines.push(Line::from(Span::styled(text, Style::default().fg(Color::Gray))));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
