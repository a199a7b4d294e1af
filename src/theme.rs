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

//! Visual styling and color configuration for the TUI.
//!
//! One palette covers the whole interface, from the archive table columns
//! through the player gauges to the command line. The only conversion out of
//! Ratatui's color type is the hex string used to restyle the terminal
//! emulator itself.

use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) gauge_track_colour: Color,
    pub(crate) commander_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) table_index_fg: Color,
    pub(crate) table_date_fg: Color,
    pub(crate) table_title_fg: Color,
    pub(crate) table_size_fg: Color,
    pub(crate) table_kind_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::default_theme()
    }
}

impl Theme {
    // Constructs the default theme.
    pub(crate) const fn default_theme() -> Self {
        Self {
            background_colour: Color::Rgb(30, 24, 40),
            accent_colour: Color::Rgb(249, 115, 22),
            border_colour: Color::Rgb(102, 102, 102),
            gauge_track_colour: Color::Rgb(48, 40, 62),
            commander_colour: Color::Rgb(210, 206, 216),
            error_colour: Color::Rgb(235, 80, 60),

            table_index_fg: Color::Rgb(162, 161, 166),
            table_date_fg: Color::Rgb(162, 161, 166),
            table_title_fg: Color::Rgb(255, 255, 255),
            table_size_fg: Color::Rgb(162, 161, 166),
            table_kind_fg: Color::Rgb(179, 157, 219),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string, for setting the terminal emulator's background color via
    /// escape sequences.
    ///
    /// # Panics
    ///
    /// Panics if the provided color is not a [`Color::Rgb`] variant. Every
    /// color in the palette is.
    pub(crate) fn to_hex(colour: Color) -> String {
        match colour {
            Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
            _ => panic!("Unexpected non-RGB colour"),
        }
    }
}
