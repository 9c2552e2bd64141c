//! Course screens view.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use training_core::models::{Course, User};

use super::state::{CourseScreen, Screen};
use crate::common::render_utils::spinner;
use crate::common::{sanitize_for_display, truncate_with_ellipsis};

/// Renders one course screen: status line, course list and detail pane.
pub fn render_course_screen(
    frame: &mut Frame,
    area: Rect,
    screen: Screen,
    state: &CourseScreen,
    spinner_frame: usize,
) {
    let fetch = state.unit.state();

    let status = status_line(state, spinner_frame);
    let [status_area, body] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(u16::from(status.is_some())),
            Constraint::Min(0),
        ])
        .areas(area);
    if let Some(line) = status {
        frame.render_widget(Paragraph::new(line), status_area);
    }

    let Some(courses) = fetch.items() else {
        let message = if fetch.error().is_some() {
            "Nothing to show."
        } else {
            "Loading courses…"
        };
        let block = Block::default().borders(Borders::ALL).title(screen.title());
        frame.render_widget(
            Paragraph::new(Line::styled(message, Style::default().fg(Color::DarkGray))).block(block),
            body,
        );
        return;
    };

    let [list_area, detail_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .areas(body);

    render_list(frame, list_area, screen, courses, state.selected);
    render_detail(frame, detail_area, state.selected_course());
}

fn status_line(state: &CourseScreen, spinner_frame: usize) -> Option<Line<'static>> {
    let fetch = state.unit.state();
    if fetch.is_refreshing() {
        return Some(Line::from(Span::styled(
            format!("{} Refreshing…", spinner(spinner_frame)),
            Style::default().fg(Color::Cyan),
        )));
    }
    fetch.error().map(|error| {
        Line::from(vec![
            Span::styled(
                "Refresh failed: ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                sanitize_for_display(error.message()),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  (r to retry)", Style::default().fg(Color::DarkGray)),
        ])
    })
}

fn render_list(frame: &mut Frame, area: Rect, screen: Screen, courses: &[Course], selected: usize) {
    let title = format!("{} ({})", screen.title(), courses.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if courses.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("No courses.", Style::default().fg(Color::DarkGray)))
                .block(block),
            area,
        );
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = courses
        .iter()
        .map(|course| {
            let topic = sanitize_for_display(&course.topic_name);
            ListItem::new(truncate_with_ellipsis(&topic, width))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut list_state = ListState::default().with_selected(Some(selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(frame: &mut Frame, area: Rect, course: Option<&Course>) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let Some(course) = course else {
        frame.render_widget(block, area);
        return;
    };

    frame.render_widget(
        Paragraph::new(detail_lines(course))
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn names(users: &[User]) -> String {
    if users.is_empty() {
        return "-".to_string();
    }
    users
        .iter()
        .map(User::display_name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Lines of the detail pane for one course.
pub(crate) fn detail_lines(course: &Course) -> Vec<Line<'static>> {
    let delivery = course.delivery_date.with_timezone(&Local);
    let updated = course.last_update.with_timezone(&Local);
    let trainers = course.trainer_names();
    let trainers = if trainers.is_empty() {
        "-".to_string()
    } else {
        trainers.join(", ")
    };

    let mut lines = vec![
        Line::styled(
            sanitize_for_display(&course.topic_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        field("Program", sanitize_for_display(&course.program_name)),
        field("Date", delivery.format("%Y-%m-%d").to_string()),
        field(
            "Time",
            format!("{} – {}", course.start_time, course.end_time),
        ),
        field(
            "Room",
            course
                .meeting_room
                .as_deref()
                .filter(|room| !room.trim().is_empty())
                .unwrap_or("-")
                .to_string(),
        ),
        field("Trainers", trainers),
        field(
            "Attendees",
            format!("{} ({})", course.attendees.len(), names(&course.attendees)),
        ),
        field("Updated", updated.format("%Y-%m-%d %H:%M").to_string()),
    ];

    let description = course.description.trim();
    if !description.is_empty() {
        lines.push(Line::default());
        lines.extend(
            description
                .lines()
                .map(|line| Line::raw(sanitize_for_display(line))),
        );
    }
    lines
}
