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

//! Command-line input logic and state management.
//!
//! This module implements the command-line processing component. It owns a
//! text input widget, and when a command is submitted it dispatches the
//! matching application event or background task. Argument problems are
//! reported as [`ArchiveError::InvalidInput`] on the event channel rather
//! than handled here, so all user-visible errors flow through one place.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::error::ArchiveError;
use crate::events::AppEvent;
use crate::model::catalog::YearFilter;
use crate::tasks::AppTask;

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Feeds a terminal event to the commander. Returns `true` when the event
    /// was consumed, `false` when it should fall through to the key handlers.
    pub(crate) fn handle_event(
        &mut self,
        event: Event,
        task_sender: &mut Sender<AppTask>,
        event_sender: &mut Sender<AppEvent>,
    ) -> bool {
        if self.active {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Esc => {
                            self.input.reset();
                            self.active = false;
                            true
                        }

                        KeyCode::Enter => {
                            let buffer = self.input.value().trim().to_string();
                            if !buffer.is_empty() {
                                let _ = self.run_command(&buffer, task_sender, event_sender);
                                self.input.reset();
                            }
                            self.active = false;
                            true
                        }

                        _ => {
                            // Delegate all key events to the managed input component.
                            if let Event::Key(_) = event {
                                self.input.handle_event(&event);
                            }

                            true
                        }
                    }
                }

                _ => false,
            }
        } else {
            match event {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char(':') => {
                        self.active = true;
                        true
                    }

                    _ => false,
                },

                _ => false,
            }
        }
    }

    fn run_command(
        &self,
        buffer: &str,
        task_sender: &mut Sender<AppTask>,
        event_sender: &mut Sender<AppEvent>,
    ) -> Result<()> {
        let parts: Vec<&str> = buffer.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] | ["quit"] => event_sender.send(AppEvent::ExitApplication)?,

            ["all"] => event_sender.send(AppEvent::YearFilterChanged(YearFilter::All))?,

            ["year", year] => match year.parse::<i32>() {
                Ok(year) => {
                    event_sender.send(AppEvent::YearFilterChanged(YearFilter::Year(year)))?
                }
                Err(_) => event_sender.send(AppEvent::CommandFailed(
                    ArchiveError::InvalidInput(format!("not a year: {year}")),
                ))?,
            },

            ["id", id] => match id.parse::<i64>() {
                Ok(id) => event_sender.send(AppEvent::SelectById(id))?,
                Err(_) => event_sender.send(AppEvent::CommandFailed(
                    ArchiveError::InvalidInput(format!("not a broadcast id: {id}")),
                ))?,
            },

            ["cid", address] => {
                event_sender.send(AppEvent::SelectByAddress(address.to_string()))?
            }

            ["next"] => event_sender.send(AppEvent::NextBroadcast)?,
            ["prev"] => event_sender.send(AppEvent::PreviousBroadcast)?,

            ["stop"] => event_sender.send(AppEvent::StopPlayback)?,
            ["retry"] => event_sender.send(AppEvent::RetryPlayback)?,

            ["reload"] => task_sender.send(AppTask::LoadCatalog)?,

            [] => {}

            [command, ..] => event_sender.send(AppEvent::CommandFailed(
                ArchiveError::InvalidInput(format!("unknown command: {command}")),
            ))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn dispatch(buffer: &str) -> (mpsc::Receiver<AppTask>, mpsc::Receiver<AppEvent>) {
        let (mut task_tx, task_rx) = mpsc::channel();
        let (mut event_tx, event_rx) = mpsc::channel();
        let commander = Commander::new();
        commander
            .run_command(buffer, &mut task_tx, &mut event_tx)
            .unwrap();
        (task_rx, event_rx)
    }

    #[test]
    fn year_command_dispatches_a_filter_change() {
        let (_tasks, events) = dispatch("year 2023");
        assert!(matches!(
            events.try_recv(),
            Ok(AppEvent::YearFilterChanged(YearFilter::Year(2023)))
        ));

        let (_tasks, events) = dispatch("all");
        assert!(matches!(
            events.try_recv(),
            Ok(AppEvent::YearFilterChanged(YearFilter::All))
        ));
    }

    #[test]
    fn malformed_arguments_report_invalid_input() {
        let (_tasks, events) = dispatch("id abc");
        assert!(matches!(
            events.try_recv(),
            Ok(AppEvent::CommandFailed(ArchiveError::InvalidInput(_)))
        ));

        let (_tasks, events) = dispatch("year soon");
        assert!(matches!(
            events.try_recv(),
            Ok(AppEvent::CommandFailed(ArchiveError::InvalidInput(_)))
        ));
    }

    #[test]
    fn unknown_commands_report_invalid_input() {
        let (_tasks, events) = dispatch("shuffle");
        assert!(matches!(
            events.try_recv(),
            Ok(AppEvent::CommandFailed(ArchiveError::InvalidInput(_)))
        ));
    }

    #[test]
    fn lookup_and_reload_commands_dispatch() {
        let (_tasks, events) = dispatch("id 7");
        assert!(matches!(events.try_recv(), Ok(AppEvent::SelectById(7))));

        let (_tasks, events) = dispatch("cid QmAbc");
        assert!(matches!(
            events.try_recv(),
            Ok(AppEvent::SelectByAddress(address)) if address == "QmAbc"
        ));

        let (tasks, _events) = dispatch("reload");
        assert!(matches!(tasks.try_recv(), Ok(AppTask::LoadCatalog)));
    }
}
