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

//! Unicode and Emoji symbols for the TUI.
//!
//! This module contains standardized icons used across the interface to
//! represent media controls and system status. These are selected for
//! compatibility with most modern terminal emulators and fonts.

use crate::model::MediaKind;
use crate::model::session::SessionState;

// Standard Media Controls (Unicode)
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";
pub(crate) const ICON_LOADING: &str = "\u{2026}";

// Text-style variants (using Variation Selector-15 [\u{FE0E}]), this forces
// terminals to render the icons as monochrome text rather than colorful
// emojis, ensuring they respect the TUI's color styling.
pub(crate) const ICON_ERROR: &str = "\u{26A0}\u{FE0E}";
pub(crate) const ICON_VIDEO: &str = "\u{1F39E}\u{FE0E}";

pub(crate) const ICON_AUDIO: &str = "\u{266B}";

// Volume State Icons (Unicode Speaker Symbols)
pub(crate) const ICON_VOLUME: &str = "\u{1F50A}";
pub(crate) const ICON_MUTED: &str = "\u{1F507}";

/// The icon summarising a playback session state.
pub(crate) fn state_icon(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => ICON_STOP,
        SessionState::Loading => ICON_LOADING,
        SessionState::Paused => ICON_PAUSE,
        SessionState::Playing => ICON_PLAY,
        SessionState::Errored => ICON_ERROR,
    }
}

pub(crate) fn kind_icon(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Audio => ICON_AUDIO,
        MediaKind::Video => ICON_VIDEO,
    }
}
