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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, the archived
//! broadcasts and the catalog they live in, plus the playback session state
//! machine that drives the player. Everything here is independent of the
//! storage backend and of the media engine.

pub(crate) mod catalog;
pub(crate) mod session;

use chrono::{Datelike, NaiveDate};

/// Title substrings that mark a broadcast as video rather than audio.
///
/// Archive titles carry the original capture filename, so the container
/// extension is the only media-kind signal the records give us.
const VIDEO_MARKERS: &[&str] = &[".mp4", ".mov", ".webm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Classifies a broadcast from its title.
    pub(crate) fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();
        if VIDEO_MARKERS.iter().any(|marker| title.contains(marker)) {
            MediaKind::Video
        } else {
            MediaKind::Audio
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
        }
    }
}

/// An archived broadcast as ingested from a source document, before the
/// catalog has assigned it an id.
#[derive(Debug, Clone)]
pub(crate) struct NewBroadcast {
    pub content_address: String,
    pub title: String,
    pub file_size_mb: f64,
    pub published: NaiveDate,
    pub artwork_address: Option<String>,
}

/// A single entry in the broadcast archive.
///
/// Records are immutable once ingested. The id is assigned by the backing
/// store and is stable for the lifetime of the catalog.
#[derive(Debug, Clone)]
pub(crate) struct Broadcast {
    pub id: i64,
    pub content_address: String,
    pub title: String,
    pub media_kind: MediaKind,
    pub file_size_mb: f64,
    pub published: NaiveDate,
    pub artwork_address: Option<String>,
}

impl Broadcast {
    /// Builds a catalog record from an ingested one, classifying the media
    /// kind exactly once.
    pub(crate) fn new(id: i64, record: NewBroadcast) -> Self {
        Self {
            id,
            media_kind: MediaKind::from_title(&record.title),
            content_address: record.content_address,
            title: record.title,
            file_size_mb: record.file_size_mb,
            published: record.published,
            artwork_address: record.artwork_address,
        }
    }

    /// Resolves the stream URL for this broadcast against a gateway base URL.
    pub(crate) fn stream_url(&self, gateway: &str) -> String {
        join_gateway(gateway, &self.content_address)
    }

    /// Resolves the artwork URL, falling back to a configured default cover
    /// when this record carries none. `None` only when neither exists.
    pub(crate) fn artwork_url(&self, gateway: &str, fallback: Option<&str>) -> Option<String> {
        self.artwork_address
            .as_deref()
            .or(fallback)
            .map(|address| join_gateway(gateway, address))
    }

    pub(crate) fn year(&self) -> i32 {
        self.published.year()
    }
}

/// Joins a gateway base URL and a content address with exactly one slash.
fn join_gateway(gateway: &str, address: &str) -> String {
    format!("{}/{}", gateway.trim_end_matches('/'), address)
}
