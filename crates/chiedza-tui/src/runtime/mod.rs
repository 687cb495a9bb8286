//! Portal runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the only place side effects happen. Async work runs as tokio
//! tasks that send their results to the inbox; the loop drains the inbox
//! each frame and feeds everything to the reducer in arrival order.

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chiedza_core::config::{Config, paths};
use chiedza_core::remote::Client;
use chrono::Local;
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence while something is loading (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Tick cadence when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

pub struct PortalRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    /// `None` when no remote service is configured.
    client: Option<Client>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Stops the auth-change forwarder on teardown.
    shutdown: CancellationToken,
    last_tick: Instant,
}

impl PortalRuntime {
    /// Builds the remote client (if configured) and takes over the terminal.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(config: &Config) -> Result<Self> {
        let client = if config.remote.is_configured() {
            Some(
                Client::new(&config.remote, config.remote_timeout(), paths::session_path())
                    .context("Failed to create remote client")?,
            )
        } else {
            tracing::info!("No remote service configured; demo mode only");
            None
        };

        let state = AppState::new(config, paths::config_path(), Local::now().date_naive());
        let (inbox_tx, inbox_rx) = inbox::channel();
        let shutdown = CancellationToken::new();

        if let Some(client) = &client {
            tokio::spawn(handlers::forward_session_changes(
                client.on_session_change(),
                inbox_tx.clone(),
                shutdown.clone(),
            ));
        }

        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            shutdown,
            last_tick: Instant::now(),
        })
    }

    /// Runs until the user quits. With `demo`, skips straight to a demo
    /// session.
    pub fn run(&mut self, demo: bool) -> Result<()> {
        let effects = update::start(&mut self.state, demo);
        self.execute_effects(effects);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let events = self.collect_events()?;
            if !events.is_empty() {
                dirty = true;
            }

            for event in events {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let tick_interval = if self.state.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };
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

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns a task with a uniform TaskStarted/TaskCompleted lifecycle.
    /// A task resolving to `None` (cancelled) sends no completion.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Option<UiEvent>> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = CancellationToken::new();
        let started = TaskStarted {
            id,
            cancel: Some(cancel.clone()),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let Some(inner) = f(cancel).await else {
                return;
            };
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::CancelTask { token } => token.cancel(),
            UiEffect::Bootstrap { task } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Bootstrap, task, |_| async move {
                    Some(handlers::bootstrap(client).await)
                });
            }
            UiEffect::SignIn {
                task,
                email,
                password,
            } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::Login, task, |_| async move {
                    Some(handlers::sign_in(client, email, password).await)
                });
            }
            UiEffect::SignOut { task } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::SignOut, task, |_| async move {
                    Some(handlers::sign_out(client).await)
                });
            }
            UiEffect::LoadDataset { task, kind, demo } => {
                let client = if demo { None } else { self.client.clone() };
                self.spawn_task(TaskKind::for_dataset(kind), task, move |cancel| {
                    handlers::load_dataset(client, kind, cancel)
                });
            }
            UiEffect::AddGroup { task, group } => {
                let client = self.client.clone();
                self.spawn_task(TaskKind::AddGroup, task, |_| async move {
                    Some(handlers::add_group(client, group).await)
                });
            }
            UiEffect::SaveSettings {
                task,
                settings,
                path,
            } => {
                self.spawn_task(TaskKind::SaveSettings, task, |_| async move {
                    Some(handlers::save_settings(path, settings).await)
                });
            }
        }
    }
}

impl Drop for PortalRuntime {
    fn drop(&mut self) {
        self.shutdown.cancel();
        let _ = terminal::restore_terminal();
    }
}
