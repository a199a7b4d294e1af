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

//! Error taxonomy for the broadcast archive.
//!
//! Everything that can go wrong on a user-visible path collapses into one of
//! four categories so the status line and the logs speak the same language.
//! Internal plumbing uses [`anyhow`] and is mapped into these variants at the
//! module boundary.

use thiserror::Error;

/// Failures surfaced to the user.
#[derive(Debug, Clone, Error)]
pub(crate) enum ArchiveError {
    /// No broadcast matches the requested id or content address.
    #[error("no such broadcast: {0}")]
    NotFound(String),

    /// A command or lookup argument failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The catalog backing store could not be read.
    #[error("archive storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The playback engine reported a failure for the current stream.
    #[error("playback failed: {0}")]
    PlaybackFailure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_category() {
        let err = ArchiveError::NotFound("id 42".to_string());
        assert_eq!(err.to_string(), "no such broadcast: id 42");

        let err = ArchiveError::StorageUnavailable("missing playlist".to_string());
        assert!(err.to_string().contains("storage unavailable"));
    }
}
