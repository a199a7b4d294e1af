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

//! Application configuration.
//!
//! Settings persist through `confy` in the platform configuration directory.
//! A missing or unreadable file silently falls back to the defaults, so the
//! application always starts.

use serde::{Deserialize, Serialize};

const CONFIG_NAME: &str = "aircheck";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,

    /// Base URL of the content-addressed gateway streams are fetched from.
    pub gateway_url: String,

    /// Path to the playlist document describing the archive.
    pub playlist_file: String,

    /// Optional SQLite mirror of the archive. When set, the catalog is
    /// served from the database instead of the playlist document.
    pub database_file: Option<String>,

    /// Content address of the artwork shown for records without their own.
    pub fallback_artwork: Option<String>,

    /// Playback volume applied at startup, as a percentage.
    pub start_volume: u32,

    /// Log destination. Logging is disabled when unset, since the terminal
    /// itself is occupied by the interface.
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway_url: "https://gateway.pinata.cloud/ipfs".to_string(),
            playlist_file: "broadcasts.json".to_string(),
            database_file: None,
            fallback_artwork: None,
            start_volume: 70,
            log_file: None,
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
