//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! This is the single source of truth for how events modify state.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth::{self, AuthAction};
use crate::features::courses::{self, Screen};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Auth(action) => handle_auth_action(app, action),
        UiEvent::Courses { screen, action } => {
            courses::handle_action(screen, &mut app.screens[screen], action)
        }
        UiEvent::TabSelected(screen) => select_tab(app, screen),
    }
}

fn handle_auth_action(app: &mut AppState, action: AuthAction) -> Vec<UiEffect> {
    let succeeded = matches!(action, AuthAction::LoginSucceeded(_));
    let mut effects = auth::reduce(&mut app.auth, action);

    if succeeded {
        let emid = app.auth.logged_in_user().and_then(|user| user.emid.clone());
        for screen in Screen::ALL.into_iter().filter(|s| s.is_personal()) {
            app.screens[screen].emid.clone_from(&emid);
        }
        effects.extend(select_tab(app, app.tab));
    }
    effects
}

/// Shows a tab. Course screens stay hidden behind the login form until the
/// session exists; the first display of a screen starts its only automatic
/// refresh.
fn select_tab(app: &mut AppState, screen: Screen) -> Vec<UiEffect> {
    app.tab = screen;
    if !app.auth.is_authenticated() {
        return vec![];
    }
    courses::show(screen, &mut app.screens[screen])
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) if !app.auth.is_authenticated() => {
            auth::handle_paste(&mut app.auth, &text)
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    if !app.auth.is_authenticated() {
        return auth::handle_key(&mut app.auth, key);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::Right => select_tab(app, app.tab.next()),
        KeyCode::BackTab | KeyCode::Left => select_tab(app, app.tab.prev()),
        KeyCode::Char(c) if c.is_ascii_digit() => match Screen::from_digit(c) {
            Some(screen) => select_tab(app, screen),
            None => vec![],
        },
        _ => {
            let tab = app.tab;
            courses::handle_key(tab, &mut app.screens[tab], key).unwrap_or_default()
        }
    }
}
