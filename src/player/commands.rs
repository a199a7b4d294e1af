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

//! MPV-backed playback worker.
//!
//! This module provides the core streaming logic, leveraging `libmpv` for
//! network fetching, decoding and playback control. It manages a background
//! worker thread that bridges the gap between the application's command-based
//! interface and the low-level MPV property observation system.
//!
//! # Architecture
//!
//! The worker operates using a dual-channel communication pattern:
//! 1. **Command Channel**: Receives [`PlayerCommand`]s from the session to
//!    control playback (load, play, pause, seek, etc.).
//! 2. **Event Channel**: Broadcasts [`EngineEvent`]s to report state changes,
//!    such as stream readiness, clock progress and volume updates.
//!
//! Streams are always loaded with playback paused. The session decides when
//! to start, so a slow gateway can never surprise the user with audio they
//! did not ask for.

use anyhow::{Context, Result};
use mpv::Format;
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::events::AppEvent;
use crate::player::EngineEvent;

#[derive(Debug)]
pub(crate) enum PlayerCommand {
    Load { url: String, generation: u64 },
    Play,
    Pause,
    SeekTo(f64),
    Stop,
    AdjustVolume(i32),
    ToggleMute,
}

/// Load-scoped state the worker carries between loop turns.
struct WorkerState {
    /// Tag of the most recently issued load; all load-scoped reports carry it.
    generation: u64,
    /// Last duration reported for the current load, in seconds.
    duration: f64,
    is_paused: bool,
    is_idle: bool,
}

/// Spawns the playback worker thread to process commands.
///
/// The receiver and sender move into a dedicated background thread that
/// lives for the rest of the process. Should the worker itself fail, the
/// error comes back on the event channel as a fatal application event.
///
/// # Arguments
///
/// * `command_rx` - The receiving end of the player command channel.
/// * `event_tx` - The channel used to broadcast playback reports and errors.
/// * `start_volume` - The output volume configured at startup, in percent.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<PlayerCommand>,
    event_tx: Sender<AppEvent>,
    start_volume: u32,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = player_worker(command_rx, event_tx, start_volume) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// The primary execution loop for the playback backend.
///
/// Builds a local `libmpv` context, registers the observed properties, then
/// alternates between draining session commands and polling the context for
/// events.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the internal
/// command/event loops encounter an unrecoverable failure.
fn player_worker(
    command_rx: Receiver<PlayerCommand>,
    event_tx: Sender<AppEvent>,
    start_volume: u32,
) -> Result<()> {
    let volume = start_volume.min(100).to_string();

    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder
            .set_option("volume", volume.as_str())
            .context("Failed to set initial volume")?;
        builder
            .set_option("volume-max", "100")
            .context("Failed to cap volume")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    handler
        .observe_property::<f64>("duration", 0)
        .context("Failed to observe duration")?;
    handler
        .observe_property::<bool>("pause", 0)
        .context("Failed to observe pause")?;
    handler
        .observe_property::<f64>("time-pos", 0)
        .context("Failed to observe time-pos")?;
    handler
        .observe_property::<f64>("volume", 0)
        .context("Failed to observe volume")?;
    handler
        .observe_property::<bool>("mute", 0)
        .context("Failed to observe mute")?;
    handler
        .observe_property::<bool>("idle-active", 0)
        .context("Failed to observe idle-active")?;

    let mut state = WorkerState {
        generation: 0,
        duration: 0.0,
        is_paused: true,
        is_idle: true,
    };

    loop {
        process_commands(&mut handler, &command_rx, &mut state, &event_tx)?;
        process_mpv_events(&mut handler, &mut state, &event_tx)?;
    }
}

/// Drains and executes all pending commands from the session channel.
///
/// A failed load does not kill the worker. The failure is reported under the
/// load's generation tag and the worker keeps serving commands, since the
/// session may well retry.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<PlayerCommand>,
    state: &mut WorkerState,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            PlayerCommand::Load { url, generation } => {
                state.generation = generation;
                state.duration = 0.0;
                // Pause before the load so a replaced stream that was playing
                // cannot bleed into the new one.
                handler.set_property("pause", true)?;
                if let Err(e) = handler.command(&["loadfile", &url, "replace"]) {
                    event_tx.send(AppEvent::Engine(EngineEvent::Failed {
                        generation,
                        message: format!("Failed to load {url}: {e}"),
                    }))?;
                }
            }
            PlayerCommand::Play => {
                handler.set_property("pause", false)?;
            }
            PlayerCommand::Pause => {
                handler.set_property("pause", true)?;
            }
            PlayerCommand::SeekTo(position) => {
                handler.command(&["seek", &position.to_string(), "absolute"])?;
            }
            PlayerCommand::Stop => {
                handler.command(&["stop"])?;
            }
            PlayerCommand::AdjustVolume(delta) => {
                handler.command(&["add", "volume", &delta.to_string()])?;
            }
            PlayerCommand::ToggleMute => {
                handler.command(&["cycle", "mute"])?;
            }
        }
    }

    Ok(())
}

/// Polls for MPV events and reports them to the application.
///
/// Waits up to 50ms for the MPV context to produce something.
/// Property changes become [`EngineEvent`]s tagged with the generation of
/// the load they describe; pause flips while the player is idle are
/// bookkeeping, not playback reports, and stay internal.
fn process_mpv_events(
    handler: &mut mpv::MpvHandler,
    state: &mut WorkerState,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    if let Some(mpv_event) = handler.wait_event(0.05) {
        let engine_event = match mpv_event {
            mpv::Event::PropertyChange { name, change, .. } => match (name, change) {
                ("duration", Format::Double(duration)) if duration > 0.0 => {
                    if (duration - state.duration).abs() > f64::EPSILON {
                        state.duration = duration;
                        Some(EngineEvent::MetadataReady {
                            generation: state.generation,
                            duration,
                        })
                    } else {
                        None
                    }
                }
                ("pause", Format::Flag(pause)) => {
                    let changed = pause != state.is_paused;
                    state.is_paused = pause;
                    if changed && !state.is_idle {
                        Some(if pause {
                            EngineEvent::Paused {
                                generation: state.generation,
                            }
                        } else {
                            EngineEvent::Playing {
                                generation: state.generation,
                            }
                        })
                    } else {
                        None
                    }
                }
                ("time-pos", Format::Double(seconds)) if seconds >= 0.0 => {
                    Some(EngineEvent::TimeChanged {
                        generation: state.generation,
                        position: seconds,
                        duration: state.duration,
                    })
                }
                ("volume", Format::Double(volume)) => Some(EngineEvent::VolumeChanged {
                    volume: (volume / 100.0).clamp(0.0, 1.0),
                }),
                ("mute", Format::Flag(muted)) => Some(EngineEvent::MuteChanged { muted }),
                ("idle-active", Format::Flag(idle_active)) => {
                    state.is_idle = idle_active;
                    None
                }
                _ => None,
            },
            mpv::Event::EndFile(result) => match result {
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_EOF) => Some(EngineEvent::EndReached {
                    generation: state.generation,
                }),
                Ok(mpv::EndFileReason::MPV_END_FILE_REASON_ERROR) => Some(EngineEvent::Failed {
                    generation: state.generation,
                    message: "Stream ended with a playback error".to_string(),
                }),
                Ok(_) => None,
                Err(e) => Some(EngineEvent::Failed {
                    generation: state.generation,
                    message: format!("Stream failed: {e}"),
                }),
            },
            _ => None,
        };

        if let Some(event) = engine_event {
            event_tx
                .send(AppEvent::Engine(event))
                .context("Failed to send engine event")?;
        }
    }

    Ok(())
}
