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

//! Application event loop and dispatching.
//!
//! Every input reaches the application as an [`AppEvent`]: key presses from
//! the input thread, engine reports from the playback worker, catalog results
//! from the task worker, commander dispatches and the periodic tick. The loop
//! in [`process_events`] applies each event to the application state and
//! redraws, so the interface is always a function of the state after the
//! latest event.
//!
//! # Organization
//!
//! * [`handlers`]: One handler per application-level event.
//! * [`key_handlers`]: Translates raw key presses into state changes and
//!   further events.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    error::ArchiveError,
    model::{Broadcast, catalog::YearFilter},
    player::EngineEvent,
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    CatalogLoaded(Vec<Broadcast>),
    CatalogUnavailable(ArchiveError),

    YearFilterChanged(YearFilter),
    SelectById(i64),
    SelectByAddress(String),
    ActivateSelection,
    NextBroadcast,
    PreviousBroadcast,
    StopPlayback,
    RetryPlayback,

    Engine(EngineEvent),

    CommandFailed(ArchiveError),

    Tick,

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// Runs the main application loop.
///
/// Blocks on the event channel, dispatches each event to its handler and
/// redraws the interface afterwards. The loop ends cleanly on
/// [`AppEvent::ExitApplication`] or when every sender is gone; a
/// [`AppEvent::FatalError`] aborts it with an error so the caller can
/// restore the terminal and report it.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::CatalogLoaded(broadcasts) => handle_catalog_loaded(app, broadcasts),
            AppEvent::CatalogUnavailable(error) => handle_catalog_unavailable(app, error),
            AppEvent::YearFilterChanged(filter) => handle_year_filter_changed(app, filter),
            AppEvent::SelectById(id) => handle_select_by_id(app, id)?,
            AppEvent::SelectByAddress(address) => handle_select_by_address(app, &address)?,
            AppEvent::ActivateSelection => handle_activate_selection(app)?,
            AppEvent::NextBroadcast => handle_next_broadcast(app)?,
            AppEvent::PreviousBroadcast => handle_previous_broadcast(app)?,
            AppEvent::StopPlayback => handle_stop_playback(app)?,
            AppEvent::RetryPlayback => handle_retry_playback(app)?,
            AppEvent::Engine(engine_event) => handle_engine_event(app, engine_event),
            AppEvent::CommandFailed(error) => handle_command_failed(app, error),
            AppEvent::Error(message) => handle_error(app, message),
            AppEvent::FatalError(message) => anyhow::bail!(message),
            AppEvent::Tick | _ => handle_tick(app),
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}
