//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox pattern
//!
//! Spawned request handlers send `UiEvent`s to `inbox_tx`; the loop drains
//! `inbox_rx` each iteration. There is no per-operation receiver and no
//! cancellation: a result whose task id is no longer active is simply
//! dropped by the reducer.

pub mod handlers;

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// How long to block on terminal input before looking at the inbox again.
const POLL_DURATION: Duration = Duration::from_millis(50);

/// Tick cadence for spinner animation and toast expiry.
const TICK_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// # Errors
    /// Returns an error if terminal setup fails.
    pub fn new(state: AppState) -> Result<Self> {
        // Set up panic hook BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop.
    ///
    /// # Errors
    /// Returns an error on terminal I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Book and category fetches start immediately and run concurrently;
        // neither depends on the other or on the session.
        self.execute_effects(vec![UiEffect::LoadBooks, UiEffect::LoadCategories]);

        while !self.state.tui.should_quit {
            let mut events = Vec::new();

            if event::poll(POLL_DURATION).context("Failed to poll terminal events")? {
                events.push(UiEvent::Terminal(
                    event::read().context("Failed to read terminal event")?,
                ));
            }

            while let Ok(ui_event) = self.inbox_rx.try_recv() {
                events.push(ui_event);
            }

            if self.last_tick.elapsed() >= TICK_DURATION {
                self.last_tick = Instant::now();
                events.push(UiEvent::Tick);
            }

            let mut effects = Vec::new();
            for ui_event in events {
                effects.extend(update::update(&mut self.state, ui_event));
            }
            self.execute_effects(effects);

            self.terminal
                .draw(|frame| render::render(&self.state, frame))
                .context("Failed to draw frame")?;
        }

        Ok(())
    }

    /// Executes effects by spawning request tasks.
    ///
    /// Each spawned task gets a fresh task id; the reducer records it as the
    /// active one for its slot, superseding any in-flight request of the
    /// same kind.
    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            let tui = &mut self.state.tui;
            let api = Arc::clone(&tui.api);
            let tx = self.inbox_tx.clone();

            match effect {
                UiEffect::LoadBooks => {
                    let id = tui.task_seq.next_id();
                    tui.tasks.books.on_started(id);
                    tokio::spawn(async move {
                        let _ = tx.send(handlers::load_books(id, &api).await);
                    });
                }
                UiEffect::LoadCategories => {
                    let id = tui.task_seq.next_id();
                    tui.tasks.categories.on_started(id);
                    tokio::spawn(async move {
                        let _ = tx.send(handlers::load_categories(id, &api).await);
                    });
                }
                UiEffect::SubmitAuth {
                    mode,
                    email,
                    password,
                    name,
                } => {
                    let id = tui.task_seq.next_id();
                    tui.tasks.auth.on_started(id);
                    tokio::spawn(async move {
                        let _ = tx
                            .send(handlers::submit_auth(id, &api, mode, &email, &password, &name).await);
                    });
                }
                UiEffect::SaveBook { editing, draft } => {
                    let id = tui.task_seq.next_id();
                    tui.tasks.save.on_started(id);
                    tokio::spawn(async move {
                        let _ = tx.send(handlers::save_book(id, &api, editing, &draft).await);
                    });
                }
                UiEffect::DeleteBook { id: book_id } => {
                    let id = tui.task_seq.next_id();
                    tui.tasks.delete.on_started(id);
                    tokio::spawn(async move {
                        let _ = tx.send(handlers::delete_book(id, &api, &book_id).await);
                    });
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
