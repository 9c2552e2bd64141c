//! Shared popup rendering helpers (login form, alerts).

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Spinner frames for busy indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Returns the spinner glyph for an animation frame counter.
pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Calculates a popup area of at most `width` x `height`, centered in `area`.
pub fn calculate_popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for a popup (clears background, draws border and title).
pub fn render_popup_container(frame: &mut Frame, area: Rect, title: &str, border_color: Color) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Returns the area inside a popup border, with one column of padding.
pub fn popup_inner(popup: Rect) -> Rect {
    Rect::new(
        popup.x + 2,
        popup.y + 1,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(2),
    )
}

/// Helper struct for keyboard hints.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Builds a line of keyboard hints: "key action • key action".
pub fn hints_line<'a>(hints: &[InputHint<'a>], highlight_color: Color) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(highlight_color)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Renders a line of keyboard hints on the last row of `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &[InputHint<'_>], highlight_color: Color) {
    if area.height == 0 {
        return;
    }
    let hints_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    let para = Paragraph::new(hints_line(hints, highlight_color)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}
