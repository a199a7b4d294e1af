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

//! User interface rendering logic.
//!
//! Translates [`App`] state into `ratatui` widgets. Rendering is stateless
//! apart from the browser's table scroll position; every frame is rebuilt
//! from scratch.
//!
//! # Rendering Pipeline
//!
//! [`draw`] is the single entry point, called after every processed event so
//! the interface always reflects the latest state.

mod browser;
mod commander;
mod details;
mod icons;
mod player;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    App,
    render::{
        browser::draw_archive, commander::draw_commander, details::draw_details,
        player::draw_player,
    },
};

/// Renders the user interface to the terminal frame.
///
/// Splits the screen into the archive listing, the player strip and the
/// command line, then hands each region to its widget builder. The mutable
/// borrow of [`App`] is needed because the table tracks its own scroll
/// position inside the browser state.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Outer layout: archive listing, player, command line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(area);

    draw_archive(f, outer[0], app);

    draw_player(f, outer[1], app);

    draw_commander(f, outer[2], app);

    // The details panel floats above everything else.
    if app.show_details {
        draw_details(f, area, app);
    }
}
