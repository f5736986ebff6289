//! Shared layout and chrome for the fishing screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Map area - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Splits the screen without drawing anything.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
///
/// Input mapping uses this too, so mouse cells line up with what was drawn.
pub fn compute_game_layout(area: Rect, info_panel_width: u16) -> GameLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);

    // Horizontal split: content area (left) | info panel (right)
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    // Left side: content (top) + status bar (bottom 2 lines)
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Draws the outer border and returns the layout inside it.
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    compute_game_layout(area, info_panel_width)
}

/// Status line plus a line of key hints.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Line ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Text bar like `[||||||    ] 60%` for a 0-100 value.
pub fn percent_bar(percent: f64, width: usize) -> String {
    let pct = percent.clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "|".repeat(filled),
        " ".repeat(width - filled),
        pct.round() as u32
    )
}

/// Green / yellow / red by how close `percent` is to danger.
pub fn danger_color(percent: f64) -> Color {
    if percent >= 80.0 {
        Color::Red
    } else if percent >= 50.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}
