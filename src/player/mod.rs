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

//! Stream playback backend.
//!
//! This module provides the [`StreamPlayer`] handle the session drives. It
//! manages a background worker thread that interfaces with the underlying
//! media library (MPV), ensuring that network and decoding work never blocks
//! the main application thread.
//!
//! Commands flow in through a channel and the worker reports back with
//! [`EngineEvent`]s wrapped in application events. Events that belong to one
//! particular load carry the generation tag the load was issued with, so the
//! session can tell a live report from a stale one.

mod commands;

use std::sync::mpsc;

use anyhow::Result;

use crate::events::AppEvent;
use crate::model::session::MediaEngine;
use crate::player::commands::PlayerCommand;

/// Reports from the playback worker.
///
/// Variants carrying a `generation` describe the stream that was loaded with
/// that tag. `VolumeChanged` and `MuteChanged` describe the output device and
/// apply regardless of what is playing.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineEvent {
    MetadataReady { generation: u64, duration: f64 },
    Playing { generation: u64 },
    Paused { generation: u64 },
    TimeChanged { generation: u64, position: f64, duration: f64 },
    EndReached { generation: u64 },
    Failed { generation: u64, message: String },
    VolumeChanged { volume: f64 },
    MuteChanged { muted: bool },
}

/// A handle to the playback engine.
///
/// This struct acts as a command proxy; it does not perform any media
/// processing itself but instead sends instructions to a background worker
/// thread.
pub(crate) struct StreamPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<PlayerCommand>,
}

impl StreamPlayer {
    /// Spawns the playback worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (engine
    ///   reports and errors) back to the main event loop.
    /// * `start_volume` - The output volume applied at startup, in percent.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>, start_volume: u32) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx, start_volume);

        Ok(Self { command_tx })
    }
}

impl MediaEngine for StreamPlayer {
    /// Instructs the worker to load a stream, paused, under a generation tag.
    fn load(&self, url: &str, generation: u64) -> Result<()> {
        self.command_tx.send(PlayerCommand::Load {
            url: url.to_string(),
            generation,
        })?;
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.command_tx.send(PlayerCommand::Play)?;
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.command_tx.send(PlayerCommand::Pause)?;
        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.command_tx.send(PlayerCommand::Stop)?;
        Ok(())
    }

    fn seek_to(&self, position: f64) -> Result<()> {
        self.command_tx.send(PlayerCommand::SeekTo(position))?;
        Ok(())
    }

    /// Adjusts the output volume relative to the current level.
    fn adjust_volume(&self, delta: i32) -> Result<()> {
        self.command_tx.send(PlayerCommand::AdjustVolume(delta))?;
        Ok(())
    }

    /// Toggles the output between muted and unmuted.
    fn toggle_mute(&self) -> Result<()> {
        self.command_tx.send(PlayerCommand::ToggleMute)?;
        Ok(())
    }
}
