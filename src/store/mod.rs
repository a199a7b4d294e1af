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

//! Catalog storage backends.
//!
//! The archive can be loaded straight from the playlist document that ships
//! with it, or from a SQLite database that mirrors the document. The database
//! backend seeds itself from the playlist on first use, so switching backends
//! needs nothing more than a config change.
//!
//! Whichever backend is active, loading failures surface as
//! [`ArchiveError::StorageUnavailable`] with the underlying cause in the
//! message.

pub(crate) mod db;
pub(crate) mod playlist;

use std::path::Path;

use anyhow::Result;

use crate::config::AppConfig;
use crate::error::ArchiveError;
use crate::model::Broadcast;

/// Loads the full broadcast catalog from the configured backend.
pub(crate) fn load_catalog(config: &AppConfig) -> Result<Vec<Broadcast>, ArchiveError> {
    let loaded = match &config.database_file {
        Some(database_file) => load_from_database(database_file, &config.playlist_file),
        None => playlist::load_broadcasts(&config.playlist_file),
    };
    loaded.map_err(|e| ArchiveError::StorageUnavailable(format!("{e:#}")))
}

/// Loads the catalog from SQLite, seeding an empty database from the
/// playlist document when one is present.
fn load_from_database(database_file: &str, playlist_file: &str) -> Result<Vec<Broadcast>> {
    let mut conn = db::open_database(database_file)?;

    let mut broadcasts = db::fetch_all_broadcasts(&conn)?;
    if broadcasts.is_empty() && Path::new(playlist_file).exists() {
        let records = playlist::read_playlist(playlist_file)?;
        let seeded = db::seed_broadcasts(&mut conn, &records)?;
        tracing::info!(seeded, database_file, "seeded broadcast database from playlist");
        broadcasts = db::fetch_all_broadcasts(&conn)?;
    }

    Ok(broadcasts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PLAYLIST: &str = r#"[
        {"cid": "QmOne", "title": "Morning show", "fileSizeMB": 12.5, "date": "2023-01-01"},
        {"cid": "QmTwo", "title": "Live set.mp4", "fileSizeMB": 700.0, "date": "2024-06-01"}
    ]"#;

    #[test]
    fn missing_playlist_reports_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            playlist_file: dir.path().join("missing.json").display().to_string(),
            database_file: None,
            ..AppConfig::default()
        };

        assert!(matches!(
            load_catalog(&config),
            Err(ArchiveError::StorageUnavailable(_))
        ));
    }

    #[test]
    fn database_backend_seeds_itself_from_the_playlist() {
        let dir = tempfile::tempdir().unwrap();
        let playlist_path = dir.path().join("broadcasts.json");
        let mut file = std::fs::File::create(&playlist_path).unwrap();
        file.write_all(PLAYLIST.as_bytes()).unwrap();

        let config = AppConfig {
            playlist_file: playlist_path.display().to_string(),
            database_file: Some(dir.path().join("archive.db").display().to_string()),
            ..AppConfig::default()
        };

        let broadcasts = load_catalog(&config).unwrap();
        assert_eq!(broadcasts.len(), 2);
        assert_eq!(broadcasts[0].content_address, "QmOne");

        // A second load reads the seeded database, not the document again.
        let again = load_catalog(&config).unwrap();
        assert_eq!(again.len(), 2);
    }
}
