//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async results arrive through an "inbox" channel: handlers send `UiEvent`s
//! to `inbox_tx`, and the runtime drains `inbox_rx` each frame.

mod handlers;

use std::future::Future;
use std::io::Stdout;

use anyhow::{Context, Result};
use crossterm::event;
use mediq_core::api::ApiClient;
use mediq_core::session::SessionStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll cadence while a network call or timer is pending.
pub const ACTIVE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(50);

/// Poll cadence when nothing is in flight.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(250);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: ApiClient,
    store: SessionStore,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    pub fn new(client: ApiClient, store: SessionStore) -> Result<Self> {
        // Panic hook goes in BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(store.clone());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            store,
            inbox_tx,
            inbox_rx,
            last_tick: std::time::Instant::now(),
        })
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        let startup = self.state.initial_effects();
        self.execute_effects(startup);

        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;

            for event in events {
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
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

    /// Collects events from the terminal and the inbox, emitting a Tick when
    /// the poll interval elapses.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Poll faster while something is pending so results and timers are
        // picked up promptly.
        let tick_interval = if self.state.is_submitting() || self.state.redirect.is_some() {
            ACTIVE_POLL_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Drain async results first.
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler, routing its result event into the inbox.
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
            UiEffect::Logout => {
                if let Err(err) = self.store.clear() {
                    tracing::warn!(error = %err, "failed to clear session on logout");
                }
                self.state.user = None;
            }
            UiEffect::Login {
                email,
                password,
                remember,
            } => {
                let client = self.client.clone();
                let store = self.store.clone();
                self.spawn_effect(move || {
                    handlers::login(client, store, email, password, remember)
                });
            }
            UiEffect::Register { email, password } => {
                let client = self.client.clone();
                let store = self.store.clone();
                self.spawn_effect(move || handlers::register(client, store, email, password));
            }
            UiEffect::VerifyOtp { user_id, otp } => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::verify_otp(client, user_id, otp));
            }
            UiEffect::ResendOtp { user_id } => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::resend_otp(client, user_id));
            }
            UiEffect::SubmitProfile { draft, profile } => {
                let client = self.client.clone();
                let store = self.store.clone();
                self.spawn_effect(move || {
                    handlers::submit_profile(client, store, draft, profile)
                });
            }
            UiEffect::LoadAccount => {
                let client = self.client.clone();
                self.spawn_effect(move || handlers::load_account(client));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
