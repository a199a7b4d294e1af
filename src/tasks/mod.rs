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

//! Asynchronous application task processing.
//!
//! Storage reads can block on the filesystem or the database, so they run on
//! a dedicated worker thread. The UI posts an [`AppTask`], the worker carries
//! it out against the store, and the outcome comes back as an [`AppEvent`].
//!
//! Anything that completes in negligible time belongs in an event handler
//! instead; tasks are reserved for work that could stall a frame.

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{config::AppConfig, events::AppEvent, store};

#[derive(Debug)]
pub(crate) enum AppTask {
    LoadCatalog,
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns its storage access completely; the rest of the application
/// only ever sees the resulting events.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(task, &config, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Dispatches a single task to its implementation.
fn handle_task(task: AppTask, config: &AppConfig, event_tx: &Sender<AppEvent>) -> Result<()> {
    match task {
        AppTask::LoadCatalog => load_catalog(config, event_tx),
    }
}

fn load_catalog(config: &AppConfig, event_tx: &Sender<AppEvent>) -> Result<()> {
    tracing::debug!("loading catalog");

    match store::load_catalog(config) {
        Ok(broadcasts) => event_tx.send(AppEvent::CatalogLoaded(broadcasts))?,
        Err(error) => event_tx.send(AppEvent::CatalogUnavailable(error))?,
    }

    Ok(())
}
