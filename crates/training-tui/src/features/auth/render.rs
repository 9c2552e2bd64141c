//! Auth feature view.
//!
//! Rendering functions for the login form and the login alert.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::state::{AlertMessage, AuthState, LoginField};
use crate::common::render_utils::{
    InputHint, calculate_popup_area, popup_inner, render_hints, render_popup_container, spinner,
};
use crate::common::{mask, truncate_start_with_ellipsis};

/// Renders the modal login form.
pub fn render_login_form(frame: &mut Frame, auth: &AuthState, area: Rect, spinner_frame: usize) {
    let popup = calculate_popup_area(area, 50, 10);
    render_popup_container(frame, popup, "Sign in", Color::Cyan);
    let inner = popup_inner(popup);

    let value_width = inner.width.saturating_sub(12) as usize;
    let mut lines = vec![
        field_line(
            "Username",
            &truncate_start_with_ellipsis(&auth.username, value_width),
            auth.focus == LoginField::Username,
        ),
        Line::default(),
        field_line(
            "Password",
            &mask(auth.password.char_count().min(value_width)),
            auth.focus == LoginField::Password,
        ),
        Line::default(),
    ];

    if auth.login_in_flight {
        lines.push(Line::styled(
            format!("{} Signing in…", spinner(spinner_frame)),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(lines), inner);

    let hints = [
        InputHint::new("Tab", "switch field"),
        InputHint::new("Enter", "sign in"),
        InputHint::new("Esc", "quit"),
    ];
    render_hints(frame, inner, &hints, Color::Cyan);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut spans = vec![
        Span::styled(format!("{label:<10}"), label_style),
        Span::raw(value.to_string()),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

/// Renders an alert popup over everything else.
pub fn render_alert(frame: &mut Frame, alert: &AlertMessage, area: Rect) {
    let popup = calculate_popup_area(area, 48, 7);
    render_popup_container(frame, popup, &alert.title, Color::Red);
    let inner = popup_inner(popup);

    frame.render_widget(
        Paragraph::new(alert.message.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );

    render_hints(frame, inner, &[InputHint::new("Enter", "dismiss")], Color::Red);
}
