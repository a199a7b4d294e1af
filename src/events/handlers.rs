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

//! Handlers for application-level events.
//!
//! Each handler mutates the application state for exactly one [`AppEvent`]
//! variant. Lookup failures and command problems land on the status line
//! instead of propagating, so a typo never takes the interface down.

use anyhow::Result;

use crate::{
    App,
    error::ArchiveError,
    model::{
        Broadcast,
        catalog::{self, Catalog, YearFilter},
        session::SessionState,
    },
    player::EngineEvent,
};

pub(super) fn handle_catalog_loaded(app: &mut App, broadcasts: Vec<Broadcast>) {
    tracing::info!(count = broadcasts.len(), "catalog loaded");
    app.catalog = Catalog::new(broadcasts);
    app.browser.set_catalog(&app.catalog);
    app.status = Some(format!("{} broadcasts in the archive", app.catalog.len()));
}

pub(super) fn handle_catalog_unavailable(app: &mut App, error: ArchiveError) {
    tracing::warn!(%error, "catalog load failed");
    app.status = Some(error.to_string());
}

pub(super) fn handle_year_filter_changed(app: &mut App, filter: YearFilter) {
    app.browser.set_filter(&app.catalog, filter);
}

pub(super) fn handle_select_by_id(app: &mut App, id: i64) -> Result<()> {
    match app.catalog.find_by_id(id) {
        Ok(broadcast) => {
            let broadcast = broadcast.clone();
            app.session.select(&broadcast)?;
            app.browser.focus_row_by_id(broadcast.id);
        }
        Err(error) => app.status = Some(error.to_string()),
    }

    Ok(())
}

pub(super) fn handle_select_by_address(app: &mut App, address: &str) -> Result<()> {
    match app.catalog.find_by_content_address(address) {
        Ok(broadcast) => {
            let broadcast = broadcast.clone();
            app.session.select(&broadcast)?;
            app.browser.focus_row_by_id(broadcast.id);
        }
        Err(error) => app.status = Some(error.to_string()),
    }

    Ok(())
}

/// Acts on the row under the browser cursor. A new row starts loading; the
/// row that is already current toggles playback instead, or retries it after
/// a failure.
pub(super) fn handle_activate_selection(app: &mut App) -> Result<()> {
    let Some(row) = app.browser.selected_row().cloned() else {
        return Ok(());
    };

    if app.session.is_selected(row.id) {
        if app.session.state() == SessionState::Errored {
            app.session.retry()?;
        } else {
            app.session.toggle_play()?;
        }
    } else {
        app.session.select(&row)?;
    }

    Ok(())
}

pub(super) fn handle_next_broadcast(app: &mut App) -> Result<()> {
    advance_selection(app, catalog::next_index)
}

pub(super) fn handle_previous_broadcast(app: &mut App) -> Result<()> {
    advance_selection(app, catalog::previous_index)
}

/// Moves the playback selection to the adjacent row of the filtered listing,
/// wrapping at either end. A selection that is filtered out restarts from
/// the top of the listing.
fn advance_selection(
    app: &mut App,
    adjacent: fn(Option<usize>, usize) -> Option<usize>,
) -> Result<()> {
    let rows = &app.browser.rows;
    let current = app
        .session
        .selected()
        .and_then(|selected| rows.iter().position(|row| row.id == selected.id));
    let Some(index) = adjacent(current, rows.len()) else {
        return Ok(());
    };

    let target = rows[index].clone();
    app.session.select(&target)?;
    app.browser.focus_row_by_id(target.id);

    Ok(())
}

pub(super) fn handle_stop_playback(app: &mut App) -> Result<()> {
    app.session.stop()
}

pub(super) fn handle_retry_playback(app: &mut App) -> Result<()> {
    app.session.retry()
}

pub(super) fn handle_engine_event(app: &mut App, event: EngineEvent) {
    match event {
        EngineEvent::MetadataReady {
            generation,
            duration,
        } => app.session.on_metadata_ready(generation, duration),
        EngineEvent::Playing { generation } => app.session.on_playing(generation),
        EngineEvent::Paused { generation } => app.session.on_paused(generation),
        EngineEvent::TimeChanged {
            generation,
            position,
            duration,
        } => app.session.on_time_update(generation, position, duration),
        EngineEvent::EndReached { generation } => app.session.on_end_reached(generation),
        EngineEvent::Failed {
            generation,
            message,
        } => app.session.on_error(generation, message),
        EngineEvent::VolumeChanged { volume } => app.session.on_volume(volume),
        EngineEvent::MuteChanged { muted } => app.session.on_mute(muted),
    }
}

pub(super) fn handle_command_failed(app: &mut App, error: ArchiveError) {
    tracing::warn!(%error, "command rejected");
    app.status = Some(error.to_string());
}

pub(super) fn handle_error(app: &mut App, message: String) {
    tracing::error!(message);
    app.status = Some(message);
}

pub(super) fn handle_tick(_app: &mut App) {}
