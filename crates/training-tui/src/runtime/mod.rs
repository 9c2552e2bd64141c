//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Handlers send their result `UiEvent` to `inbox_tx`
//! - The runtime drains `inbox_rx` each loop iteration

mod handlers;
mod inbox;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use tokio::sync::mpsc;
use training_core::{Clients, Config};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, TuiTerminal};
use crate::{render, update};

/// Frame cadence while something is loading (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Service handles and settings the runtime needs to execute effects.
#[derive(Clone)]
pub struct Environment {
    pub clients: Clients,
    pub upcoming_window_hours: u32,
}

impl Environment {
    pub fn new(clients: Clients, config: &Config) -> Self {
        Self {
            clients,
            upcoming_window_hours: config.upcoming_window_hours,
        }
    }
}

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: TuiTerminal,
    pub state: AppState,
    env: Environment,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Last time a Tick event was emitted.
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime. Must be called inside a tokio runtime.
    pub fn new(env: Environment) -> Result<Self> {
        // Before entering the alternate screen.
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(),
            env,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        // Display the initial tab; nothing is fetched until login succeeds.
        self.dispatch_event(UiEvent::TabSelected(self.state.tab));

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                dirty = true;
                self.dispatch_event(event);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from the inbox and the terminal, then emits a Tick
    /// when one is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.is_busy() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick only when there is nothing to process.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and sends its result event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::Login { username, password } => {
                let clients = self.env.clients.clone();
                self.spawn_effect(move || handlers::login(clients, username, password));
            }
            UiEffect::FetchCourses { screen, req, emid } => {
                let api = Arc::clone(&self.env.clients.api);
                let hours = self.env.upcoming_window_hours;
                self.spawn_effect(move || handlers::fetch_courses(api, screen, req, emid, hours));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
