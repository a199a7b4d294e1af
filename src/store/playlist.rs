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

//! Playlist document ingestion.
//!
//! The archive ships as a JSON array of entries, each carrying a content
//! address, a display title, the file size in megabytes and a publication
//! date. Entries are numbered 1..n in document order and that numbering is
//! the broadcast id, so the document is the single source of truth for ids.
//!
//! The document is trusted but not blindly: empty content addresses,
//! duplicate content addresses and unparseable dates reject the whole
//! document, because a catalog with broken identity invariants is worse
//! than no catalog at all.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use crate::model::{Broadcast, NewBroadcast};

/// One entry of the playlist document, exactly as serialized.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistEntry {
    cid: String,
    title: String,
    #[serde(rename = "fileSizeMB")]
    file_size_mb: f64,
    date: String,
    #[serde(default)]
    image_cid: Option<String>,
}

/// Reads and validates a playlist document.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or if any
/// entry has an empty or duplicate content address or an unparseable date.
pub(crate) fn read_playlist<P: AsRef<Path>>(path: P) -> Result<Vec<NewBroadcast>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist {}", path.display()))?;

    let entries: Vec<PlaylistEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse playlist {}", path.display()))?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let position = index + 1;
        if entry.cid.trim().is_empty() {
            bail!("Playlist entry {position} has an empty content address");
        }
        if !seen.insert(entry.cid.clone()) {
            bail!(
                "Playlist entry {position} repeats content address {}",
                entry.cid
            );
        }
        let published = parse_date(&entry.date)
            .with_context(|| format!("Playlist entry {position} has invalid date {:?}", entry.date))?;

        records.push(NewBroadcast {
            content_address: entry.cid,
            title: entry.title,
            file_size_mb: entry.file_size_mb,
            published,
            artwork_address: entry.image_cid,
        });
    }

    Ok(records)
}

/// Loads the playlist as finished catalog records, ids assigned 1..n in
/// document order.
pub(crate) fn load_broadcasts<P: AsRef<Path>>(path: P) -> Result<Vec<Broadcast>> {
    let records = read_playlist(path)?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(index, record)| Broadcast::new(index as i64 + 1, record))
        .collect())
}

/// Dates in the wild are either plain `YYYY-MM-DD` or a full RFC 3339
/// timestamp; only the calendar date matters here.
fn parse_date(raw: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.date_naive());
    }
    bail!("Unsupported date format: {raw}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;
    use std::io::Write;

    fn write_playlist(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broadcasts.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn entries_get_one_based_ids_in_document_order() {
        let (_dir, path) = write_playlist(
            r#"[
                {"cid": "QmA", "title": "Late show", "fileSizeMB": 96.4, "date": "2023-06-15"},
                {"cid": "QmB", "title": "Live set.mp4", "fileSizeMB": 700.0, "date": "2022-01-02", "imageCid": "QmCover"}
            ]"#,
        );

        let broadcasts = load_broadcasts(&path).unwrap();
        assert_eq!(broadcasts.len(), 2);

        assert_eq!(broadcasts[0].id, 1);
        assert_eq!(broadcasts[0].content_address, "QmA");
        assert_eq!(broadcasts[0].media_kind, MediaKind::Audio);
        assert_eq!(broadcasts[0].published.to_string(), "2023-06-15");
        assert_eq!(broadcasts[0].artwork_address, None);

        assert_eq!(broadcasts[1].id, 2);
        assert_eq!(broadcasts[1].media_kind, MediaKind::Video);
        assert_eq!(broadcasts[1].artwork_address.as_deref(), Some("QmCover"));
    }

    #[test]
    fn rfc3339_timestamps_reduce_to_the_calendar_date() {
        let (_dir, path) = write_playlist(
            r#"[{"cid": "QmA", "title": "Show", "fileSizeMB": 1.0, "date": "2023-06-15T09:30:00Z"}]"#,
        );
        let broadcasts = load_broadcasts(&path).unwrap();
        assert_eq!(broadcasts[0].published.to_string(), "2023-06-15");
    }

    #[test]
    fn duplicate_content_addresses_reject_the_document() {
        let (_dir, path) = write_playlist(
            r#"[
                {"cid": "QmA", "title": "One", "fileSizeMB": 1.0, "date": "2023-01-01"},
                {"cid": "QmA", "title": "Two", "fileSizeMB": 2.0, "date": "2023-01-02"}
            ]"#,
        );
        let err = read_playlist(&path).unwrap_err();
        assert!(err.to_string().contains("repeats content address"));
    }

    #[test]
    fn empty_content_addresses_reject_the_document() {
        let (_dir, path) = write_playlist(
            r#"[{"cid": "  ", "title": "One", "fileSizeMB": 1.0, "date": "2023-01-01"}]"#,
        );
        let err = read_playlist(&path).unwrap_err();
        assert!(err.to_string().contains("empty content address"));
    }

    #[test]
    fn unparseable_dates_reject_the_document() {
        let (_dir, path) = write_playlist(
            r#"[{"cid": "QmA", "title": "One", "fileSizeMB": 1.0, "date": "June 15th"}]"#,
        );
        assert!(read_playlist(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_playlist("/no/such/broadcasts.json").is_err());
    }
}
