// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Broadcast Archive TUI.
//!
//! A terminal-based browser and player for a fixed archive of radio
//! broadcasts published through a content-addressed gateway.
//!
//! The interface is drawn with `ratatui` on the main thread, which owns all
//! application state and consumes a single [`AppEvent`] channel. Everything
//! else happens off-thread:
//!
//! * a **task worker** loads the broadcast catalog from its backing store,
//! * a **player worker** drives the embedded mpv engine and reports property
//!   changes back as engine events,
//! * small dedicated threads forward keyboard input and a periodic tick.
//!
//! ## Architecture
//!
//! Terminal setup and teardown bracket the event loop so the user's terminal
//! is restored even when the loop exits with an error. All cross-thread
//! communication goes through `std::sync::mpsc` channels; no state is
//! shared behind locks.

mod browser;
mod commander;
mod config;
mod error;
mod events;
mod model;
mod player;
mod render;
mod store;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::OpenOptions,
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing_subscriber::EnvFilter;

use crate::{
    browser::ArchiveBrowser,
    commander::Commander,
    config::AppConfig,
    events::{AppEvent, process_events},
    model::{catalog::Catalog, session::PlaybackSession},
    player::StreamPlayer,
    tasks::AppTask,
    theme::Theme,
};

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub catalog: Catalog,
    pub browser: ArchiveBrowser,
    pub session: PlaybackSession<StreamPlayer>,

    pub commander: Commander,

    pub show_details: bool,
    pub status: Option<String>,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let player = StreamPlayer::new(event_tx.clone(), config.start_volume)?;
        let session = PlaybackSession::new(
            player,
            config.gateway_url.clone(),
            f64::from(config.start_volume.min(100)) / 100.0,
        );

        Ok(Self {
            config,
            theme: Theme::default(),
            event_tx,
            event_rx,
            task_tx,
            catalog: Catalog::empty(),
            browser: ArchiveBrowser::new(),
            session,
            commander: Commander::new(),
            show_details: false,
            status: None,
        })
    }
}

/// The entry point of the application.
///
/// Loads configuration, wires up the channels and application state, then
/// brackets the event loop with terminal setup and teardown.
fn main() -> Result<()> {
    let config = config::load_config();
    init_tracing(&config)?;

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx).context("Failed to initialise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Routes tracing output to the configured log file.
///
/// Logging stays off when no file is configured, since the terminal itself is
/// occupied by the interface. The filter defaults to `info` and can be
/// overridden through `RUST_LOG`.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let Some(log_file) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {log_file}"))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// Paints the emulator background from the theme, enables raw mode so every
/// key press reaches the application, and switches to the alternate screen
/// buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Covers the strip of emulator background left around the drawn area.
    util::term::set_terminal_bg(&theme::Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Undoes everything [`setup_terminal`] did and brings the cursor back.
/// Runs during cleanup, so each step is best-effort and failures are
/// ignored.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the background workers and enters the main event loop.
///
/// Three threads are spawned before the loop takes over: the task worker
/// that owns store access, a reader forwarding keyboard input, and a ticker
/// that keeps the interface refreshing while nothing else happens. The
/// initial catalog load is requested here so the archive appears without
/// user action.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process application tasks asynchronously.
    let task_event_tx = app.event_tx.clone();
    tasks::spawn_task_worker(&app.config, task_rx, task_event_tx);

    // Forward raw key events onto the application event channel.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Periodic tick, the minimum redraw rate for the interface.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial trigger to populate the archive listing from the catalog
    app.task_tx.send(AppTask::LoadCatalog)?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
