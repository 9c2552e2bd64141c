//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference and draw to a
//! ratatui Frame. They never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::common::render_utils::{InputHint, hints_line};
use crate::common::{sanitize_for_display, truncate_with_ellipsis};
use crate::features::auth;
use crate::features::courses::{self, Screen};
use crate::state::AppState;

/// Height of the tab bar.
const TABS_HEIGHT: u16 = 1;

/// Height of the hints footer.
const FOOTER_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [tabs_area, body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

    render_tabs(app, frame, tabs_area);

    if app.auth.is_authenticated() {
        courses::render_course_screen(
            frame,
            body,
            app.tab,
            app.current_screen(),
            app.spinner_frame,
        );
    } else {
        render_signed_out(frame, body);
        auth::render_login_form(frame, &app.auth, body, app.spinner_frame);
    }

    render_footer(app, frame, footer);

    // Alerts draw on top of everything else.
    if let Some(alert) = &app.auth.login_error_alert {
        auth::render_alert(frame, alert, area);
    }
}

fn render_tabs(app: &AppState, frame: &mut Frame, area: Rect) {
    let [tabs_area, user_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(user_width(area))])
        .areas(area);

    let titles: Vec<Line> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| Line::from(format!("{} {}", i + 1, screen.tab_label())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));
    frame.render_widget(tabs, tabs_area);

    if let Some(user) = app.auth.logged_in_user() {
        let name = sanitize_for_display(&user.display_name());
        let name = truncate_with_ellipsis(&name, user_area.width.saturating_sub(1) as usize);
        frame.render_widget(
            Paragraph::new(Line::styled(name, Style::default().fg(Color::Green)))
                .alignment(Alignment::Right),
            user_area,
        );
    }
}

fn user_width(area: Rect) -> u16 {
    (area.width / 3).min(32)
}

fn render_signed_out(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Training");
    frame.render_widget(
        Paragraph::new(Line::styled(
            "Sign in to see courses.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block),
        area,
    );
}

fn render_footer(app: &AppState, frame: &mut Frame, area: Rect) {
    if !app.auth.is_authenticated() {
        return;
    }
    let hints = [
        InputHint::new("1-4", "tab"),
        InputHint::new("↑↓", "select"),
        InputHint::new("r", "refresh"),
        InputHint::new("q", "quit"),
    ];
    frame.render_widget(
        Paragraph::new(hints_line(&hints, Color::Cyan)).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use training_core::Session;
    use training_core::mock::{demo_course, demo_user};

    use super::*;
    use crate::features::auth::AlertMessage;
    use crate::features::courses::FetchAction;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn signed_in() -> AppState {
        let mut app = AppState::new();
        app.auth.session = Some(Session {
            ticket: "ST-1".to_string(),
            auth_id: "a1".to_string(),
            user: demo_user(),
        });
        app
    }

    #[test]
    fn test_signed_out_shows_login_form() {
        let app = AppState::new();

        let screen = draw(&app);

        assert!(screen.contains("Sign in"));
        assert!(screen.contains("Username"));
        assert!(!screen.contains("Moony Chen"));
    }

    #[test]
    fn test_signed_in_shows_user_and_courses() {
        let mut app = signed_in();
        let unit = &mut app.screens[Screen::Upcoming].unit;
        let req = unit.update(FetchAction::RequestRefresh).unwrap();
        unit.update(FetchAction::ResponseReceived {
            req,
            result: Ok(vec![demo_course(1, "Swift"), demo_course(2, "Combine")]),
        });

        let screen = draw(&app);

        assert!(screen.contains("Moony Chen"));
        assert!(screen.contains("Upcoming Courses (2)"));
        assert!(screen.contains("Combine"));
        assert!(screen.contains("refresh"));
    }

    #[test]
    fn test_long_username_shows_latest_input() {
        let mut app = AppState::new();
        app.auth.username = format!("{}TAIL9", "x".repeat(80));

        let screen = draw(&app);

        assert!(screen.contains("…"));
        assert!(screen.contains("TAIL9"));
    }

    #[test]
    fn test_alert_is_drawn() {
        let mut app = AppState::new();
        app.auth.login_error_alert = Some(AlertMessage::login_failed());

        let screen = draw(&app);

        assert!(screen.contains("Login Failed"));
    }
}
