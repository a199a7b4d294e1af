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

//! Keyboard input routing.
//!
//! Key presses go to the commander first when it is capturing input;
//! everything else falls through to the global bindings below.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{App, events::AppEvent};

const FINE_VOLUME_DELTA: i32 = 1;
const VOLUME_DELTA: i32 = 5;

const FINE_SEEK_DELTA: i32 = 5;
const SEEK_DELTA: i32 = 20;

/// Maps keyboard input to application actions and playback commands.
///
/// The commander gets first refusal on every key so typed commands are never
/// intercepted by the global bindings. Whatever it declines falls through to
/// the global map covering application control, archive navigation and the
/// year filter, and the playback session.
///
/// # Errors
///
/// Returns an error if a command fails to send to a background worker.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    let handled = app
        .commander
        .handle_event(event, &mut app.task_tx, &mut app.event_tx);
    if handled {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        // Navigation through the archive listing.
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => app.browser.next_row(),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => app.browser.previous_row(),
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => app.browser.first_row(),
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => app.browser.last_row(),

        // Year filter chips.
        (KeyCode::Char('y'), _) => app.browser.cycle_filter_forward(&app.catalog),
        (KeyCode::Char('Y'), _) => app.browser.cycle_filter_backward(&app.catalog),

        (KeyCode::Enter, _) => app.event_tx.send(AppEvent::ActivateSelection)?,
        (KeyCode::Char('n'), _) => app.event_tx.send(AppEvent::NextBroadcast)?,
        (KeyCode::Char('p'), _) => app.event_tx.send(AppEvent::PreviousBroadcast)?,

        (KeyCode::Char(' '), _) => app.session.toggle_play()?,
        (KeyCode::Char('s'), _) => app.session.stop()?,
        (KeyCode::Char('r'), _) => app.session.retry()?,

        (KeyCode::Char(','), _) => app.session.seek_by(f64::from(-FINE_SEEK_DELTA))?,
        (KeyCode::Char('.'), _) => app.session.seek_by(f64::from(FINE_SEEK_DELTA))?,
        (KeyCode::Char('<'), _) => app.session.seek_by(f64::from(-SEEK_DELTA))?,
        (KeyCode::Char('>'), _) => app.session.seek_by(f64::from(SEEK_DELTA))?,

        (KeyCode::Char('-'), _) => app.session.adjust_volume(-FINE_VOLUME_DELTA)?,
        (KeyCode::Char('='), _) => app.session.adjust_volume(FINE_VOLUME_DELTA)?,
        (KeyCode::Char('_'), _) => app.session.adjust_volume(-VOLUME_DELTA)?,
        (KeyCode::Char('+'), _) => app.session.adjust_volume(VOLUME_DELTA)?,
        (KeyCode::Char('m'), _) => app.session.toggle_mute()?,

        (KeyCode::Char('i'), _) => app.show_details = !app.show_details,

        (KeyCode::Esc, _) => app.status = None,

        _ => {}
    }

    Ok(())
}
