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

//! SQLite catalog backend.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation, fetching broadcast records and seeding the table from a
//! playlist document. It uses cached statements to reduce SQL parsing
//! overhead on repeated lookups.
//!
//! # Tables
//!
//! * `broadcasts` - One row per archived broadcast. The row id is the
//!   broadcast id and content addresses are unique across the table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::model::{Broadcast, NewBroadcast};

/// Opens a connection to the SQLite database and configures it.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging for better concurrency.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL`.
/// * **Schema**: Executes [`create_schema`] to ensure the table exists.
///
/// # Arguments
///
/// * `path` - The file system path to the SQLite database file.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn open_database(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open broadcast database {path}"))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
    conn.set_prepared_statement_cache_capacity(16);

    create_schema(&conn)?;

    Ok(conn)
}

/// Create the database schema.
///
/// The single `broadcasts` table carries the archive. Content addresses are
/// unique, and the published date is indexed because the catalog always
/// lists by it.
///
/// # Errors
///
/// Returns an error if the transaction fails, if there are permission issues
/// with the database file, or if the SQL syntax is invalid.
fn create_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS broadcasts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            content_address TEXT NOT NULL UNIQUE,
            title TEXT NOT NULL,
            file_size_mb REAL NOT NULL,
            published TEXT NOT NULL,
            artwork_address TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_broadcasts_published ON broadcasts (published);

        COMMIT;",
    )
    .context("Failed to create schema")
}

fn broadcast_from_row(row: &rusqlite::Row) -> rusqlite::Result<Broadcast> {
    Ok(Broadcast::new(
        row.get(0)?,
        NewBroadcast {
            content_address: row.get(1)?,
            title: row.get(2)?,
            file_size_mb: row.get(3)?,
            published: row.get(4)?,
            artwork_address: row.get(5)?,
        },
    ))
}

const BROADCAST_COLUMNS: &str =
    "id, content_address, title, file_size_mb, published, artwork_address";

/// Fetches every broadcast in id order, which is the order the archive was
/// ingested in.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if there is a type mismatch
/// when mapping the database rows to the [`Broadcast`] struct.
pub(crate) fn fetch_all_broadcasts(conn: &Connection) -> Result<Vec<Broadcast>> {
    let sql = format!("SELECT {BROADCAST_COLUMNS} FROM broadcasts ORDER BY id");
    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([], broadcast_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(results)
}

/// Fetches a single broadcast by id, or `None` when the id is unknown.
pub(crate) fn fetch_broadcast(conn: &Connection, id: i64) -> Result<Option<Broadcast>> {
    let sql = format!("SELECT {BROADCAST_COLUMNS} FROM broadcasts WHERE id = ?");
    let mut stmt = conn.prepare_cached(&sql)?;
    let result = stmt.query_one([id], broadcast_from_row).optional()?;

    Ok(result)
}

/// Fetches a single broadcast by content address, or `None` when no record
/// carries that address.
pub(crate) fn fetch_broadcast_by_address(
    conn: &Connection,
    content_address: &str,
) -> Result<Option<Broadcast>> {
    let sql = format!("SELECT {BROADCAST_COLUMNS} FROM broadcasts WHERE content_address = ?");
    let mut stmt = conn.prepare_cached(&sql)?;
    let result = stmt
        .query_one([content_address], broadcast_from_row)
        .optional()?;

    Ok(result)
}

/// Inserts one broadcast and returns its assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the content address
/// already exists in the table.
pub(crate) fn insert_broadcast(conn: &Connection, record: &NewBroadcast) -> Result<i64> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO broadcasts (content_address, title, file_size_mb, published, artwork_address)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![
        record.content_address,
        record.title,
        record.file_size_mb,
        record.published,
        record.artwork_address,
    ])?;

    Ok(conn.last_insert_rowid())
}

/// Seeds the table from playlist records inside a single transaction.
///
/// Records whose content address is already present are skipped, so seeding
/// is safe to repeat against a populated database.
///
/// # Arguments
///
/// * `conn` - A mutable reference to the SQLite database connection.
/// * `records` - The playlist records, in document order.
///
/// # Returns
///
/// Returns the number of rows actually inserted.
///
/// # Errors
///
/// Returns an error if the transaction fails or a constraint other than the
/// content address uniqueness is violated.
pub(crate) fn seed_broadcasts(conn: &mut Connection, records: &[NewBroadcast]) -> Result<usize> {
    let tx = conn.transaction()?;

    let mut inserted = 0;
    for record in records {
        inserted += tx.execute(
            "INSERT OR IGNORE INTO broadcasts
                 (content_address, title, file_size_mb, published, artwork_address)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.content_address,
                record.title,
                record.file_size_mb,
                record.published,
                record.artwork_address,
            ],
        )?;
    }

    tx.commit()?;

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaKind;
    use chrono::NaiveDate;

    fn record(address: &str, title: &str, date: &str) -> NewBroadcast {
        NewBroadcast {
            content_address: address.to_string(),
            title: title.to_string(),
            file_size_mb: 96.4,
            published: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            artwork_address: None,
        }
    }

    fn open_temp() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("archive.db");
        let conn = open_database(path.to_str().unwrap()).unwrap();
        (dir, conn)
    }

    #[test]
    fn inserted_broadcasts_round_trip() {
        let (_dir, conn) = open_temp();

        let id = insert_broadcast(&conn, &record("QmA", "Morning show", "2023-06-15")).unwrap();
        assert_eq!(id, 1);

        let broadcast = fetch_broadcast(&conn, id).unwrap().unwrap();
        assert_eq!(broadcast.content_address, "QmA");
        assert_eq!(broadcast.title, "Morning show");
        assert_eq!(broadcast.media_kind, MediaKind::Audio);
        assert_eq!(broadcast.published.to_string(), "2023-06-15");
        assert_eq!(broadcast.artwork_address, None);

        assert!(fetch_broadcast(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn content_address_lookup_matches_exactly() {
        let (_dir, conn) = open_temp();
        insert_broadcast(&conn, &record("QmA", "One", "2023-01-01")).unwrap();

        let found = fetch_broadcast_by_address(&conn, "QmA").unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert!(fetch_broadcast_by_address(&conn, "QmB").unwrap().is_none());
    }

    #[test]
    fn seeding_assigns_document_order_ids_and_is_idempotent() {
        let (_dir, mut conn) = open_temp();
        let records = vec![
            record("QmA", "One", "2023-01-01"),
            record("QmB", "Two.mp4", "2024-06-01"),
        ];

        assert_eq!(seed_broadcasts(&mut conn, &records).unwrap(), 2);

        let all = fetch_all_broadcasts(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].content_address, "QmA");
        assert_eq!(all[1].id, 2);
        assert_eq!(all[1].media_kind, MediaKind::Video);

        // Seeding again inserts nothing new.
        assert_eq!(seed_broadcasts(&mut conn, &records).unwrap(), 0);
        assert_eq!(fetch_all_broadcasts(&conn).unwrap().len(), 2);
    }

    #[test]
    fn duplicate_content_addresses_are_rejected_on_insert() {
        let (_dir, conn) = open_temp();
        insert_broadcast(&conn, &record("QmA", "One", "2023-01-01")).unwrap();
        assert!(insert_broadcast(&conn, &record("QmA", "Two", "2023-01-02")).is_err());
    }
}
