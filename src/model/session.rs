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

//! Playback session state machine.
//!
//! A session tracks one selected broadcast through the states
//! `Idle -> Loading -> Paused <-> Playing`, with `Errored` reachable from any
//! of them. The session never talks to the media engine directly beyond the
//! [`MediaEngine`] trait, and the engine reports back through the `on_*`
//! callbacks, so the machine can be driven (and tested) without a real
//! player behind it.
//!
//! Engine callbacks are asynchronous and can arrive after the selection has
//! already moved on. Every load bumps a generation counter, loads are issued
//! tagged with it, and callbacks carrying a stale generation are dropped on
//! the floor. Volume and mute reports are device state rather than stream
//! state and are applied untagged.

use anyhow::Result;

use crate::error::ArchiveError;
use crate::model::Broadcast;

/// Commands a playback backend has to honour.
///
/// Implementations are expected to be asynchronous: a call only requests the
/// action, and the outcome arrives later through the session callbacks.
pub(crate) trait MediaEngine {
    /// Starts loading a stream, paused, tagged with the session generation.
    fn load(&self, url: &str, generation: u64) -> Result<()>;
    fn play(&self) -> Result<()>;
    fn pause(&self) -> Result<()>;
    fn stop(&self) -> Result<()>;
    /// Seeks to an absolute position in seconds.
    fn seek_to(&self, position: f64) -> Result<()>;
    /// Adjusts the device volume by a signed percentage step.
    fn adjust_volume(&self, delta: i32) -> Result<()>;
    fn toggle_mute(&self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    Idle,
    Loading,
    Paused,
    Playing,
    Errored,
}

pub(crate) struct PlaybackSession<E> {
    engine: E,
    gateway: String,

    state: SessionState,
    selected: Option<Broadcast>,
    generation: u64,

    position: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    last_error: Option<ArchiveError>,
}

impl<E: MediaEngine> PlaybackSession<E> {
    pub(crate) fn new(engine: E, gateway: String, initial_volume: f64) -> Self {
        Self {
            engine,
            gateway,
            state: SessionState::Idle,
            selected: None,
            generation: 0,
            position: 0.0,
            duration: 0.0,
            volume: initial_volume.clamp(0.0, 1.0),
            muted: false,
            last_error: None,
        }
    }

    /// Selects a broadcast and starts loading its stream.
    ///
    /// Re-selecting the record that is already current is a no-op, so the
    /// browser can fire selections freely without restarting playback. The
    /// one exception is the `Errored` state, where selecting the current
    /// record again means "try once more".
    pub(crate) fn select(&mut self, broadcast: &Broadcast) -> Result<()> {
        if self.state != SessionState::Errored
            && self
                .selected
                .as_ref()
                .is_some_and(|current| current.id == broadcast.id)
        {
            return Ok(());
        }
        self.load(broadcast.clone())
    }

    /// Reloads the current selection after a failure. Without a selection
    /// there is nothing to retry.
    pub(crate) fn retry(&mut self) -> Result<()> {
        match self.selected.clone() {
            Some(broadcast) => self.load(broadcast),
            None => Ok(()),
        }
    }

    fn load(&mut self, broadcast: Broadcast) -> Result<()> {
        self.generation += 1;
        let url = broadcast.stream_url(&self.gateway);
        tracing::info!(id = broadcast.id, url, "loading broadcast");
        self.selected = Some(broadcast);
        self.state = SessionState::Loading;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_error = None;
        self.engine.load(&url, self.generation)
    }

    /// Requests playback when paused and a pause when playing. Does nothing
    /// in the other states, so a key mashed during a load stays harmless.
    pub(crate) fn toggle_play(&mut self) -> Result<()> {
        match self.state {
            SessionState::Playing => self.pause(),
            SessionState::Paused => self.play(),
            _ => Ok(()),
        }
    }

    /// Requests playback. The state moves to `Playing` only once the engine
    /// confirms through [`PlaybackSession::on_playing`].
    pub(crate) fn play(&mut self) -> Result<()> {
        if self.state == SessionState::Paused {
            self.engine.play()?;
        }
        Ok(())
    }

    pub(crate) fn pause(&mut self) -> Result<()> {
        if self.state == SessionState::Playing {
            self.engine.pause()?;
        }
        Ok(())
    }

    /// Drops the selection and returns to `Idle`. Bumps the generation so
    /// anything still in flight for the old stream is discarded.
    pub(crate) fn stop(&mut self) -> Result<()> {
        if self.selected.is_none() {
            return Ok(());
        }
        self.generation += 1;
        self.selected = None;
        self.state = SessionState::Idle;
        self.position = 0.0;
        self.duration = 0.0;
        self.last_error = None;
        self.engine.stop()
    }

    /// Seeks to an absolute position, clamped to the known duration. Only
    /// meaningful once the stream is up; ignored in the other states.
    pub(crate) fn seek(&mut self, position: f64) -> Result<()> {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return Ok(());
        }
        let clamped = self.clamp_position(position);
        self.position = clamped;
        self.engine.seek_to(clamped)
    }

    /// Seeks relative to the current position.
    pub(crate) fn seek_by(&mut self, delta: f64) -> Result<()> {
        self.seek(self.position + delta)
    }

    pub(crate) fn adjust_volume(&mut self, delta: i32) -> Result<()> {
        self.engine.adjust_volume(delta)
    }

    pub(crate) fn toggle_mute(&mut self) -> Result<()> {
        self.engine.toggle_mute()
    }

    fn clamp_position(&self, position: f64) -> f64 {
        if self.duration > 0.0 {
            position.clamp(0.0, self.duration)
        } else {
            position.max(0.0)
        }
    }

    /// The stream metadata arrived and playback is possible. Only a load
    /// still in `Loading` can become ready; late reports for superseded
    /// loads carry an old generation and are dropped.
    pub(crate) fn on_metadata_ready(&mut self, generation: u64, duration: f64) {
        if generation != self.generation || self.state != SessionState::Loading {
            return;
        }
        self.duration = duration.max(0.0);
        self.state = SessionState::Paused;
    }

    pub(crate) fn on_playing(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        if self.state == SessionState::Paused {
            self.state = SessionState::Playing;
        }
    }

    pub(crate) fn on_paused(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        if self.state == SessionState::Playing {
            self.state = SessionState::Paused;
        }
    }

    /// Advances the playback clock. Duration refinements ride along because
    /// some streams only settle on a final duration after playback starts.
    pub(crate) fn on_time_update(&mut self, generation: u64, position: f64, duration: f64) {
        if generation != self.generation {
            return;
        }
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return;
        }
        if duration > 0.0 {
            self.duration = duration;
        }
        self.position = self.clamp_position(position);
    }

    /// The stream played through to the end. The clock parks at the duration
    /// and the session waits, paused, for the next instruction.
    pub(crate) fn on_end_reached(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        if matches!(self.state, SessionState::Playing | SessionState::Paused) {
            self.position = self.duration;
            self.state = SessionState::Paused;
        }
    }

    /// The engine failed the current stream. Valid from any state; the
    /// selection is kept so the failure can be retried.
    pub(crate) fn on_error(&mut self, generation: u64, message: String) {
        if generation != self.generation {
            return;
        }
        tracing::warn!(generation, message, "playback error");
        self.state = SessionState::Errored;
        self.last_error = Some(ArchiveError::PlaybackFailure(message));
    }

    pub(crate) fn on_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub(crate) fn on_mute(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    pub(crate) fn selected(&self) -> Option<&Broadcast> {
        self.selected.as_ref()
    }

    pub(crate) fn is_selected(&self, id: i64) -> bool {
        self.selected.as_ref().is_some_and(|current| current.id == id)
    }

    pub(crate) fn position(&self) -> f64 {
        self.position
    }

    pub(crate) fn duration(&self) -> f64 {
        self.duration
    }

    /// Playback progress in `0.0..=1.0` for the position gauge.
    pub(crate) fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub(crate) fn volume(&self) -> f64 {
        self.volume
    }

    pub(crate) fn muted(&self) -> bool {
        self.muted
    }

    pub(crate) fn last_error(&self) -> Option<&ArchiveError> {
        self.last_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewBroadcast;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum EngineCall {
        Load(String, u64),
        Play,
        Pause,
        Stop,
        SeekTo(f64),
        AdjustVolume(i32),
        ToggleMute,
    }

    #[derive(Clone, Default)]
    struct TestEngine {
        calls: Rc<RefCell<Vec<EngineCall>>>,
    }

    impl MediaEngine for TestEngine {
        fn load(&self, url: &str, generation: u64) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(EngineCall::Load(url.to_string(), generation));
            Ok(())
        }

        fn play(&self) -> Result<()> {
            self.calls.borrow_mut().push(EngineCall::Play);
            Ok(())
        }

        fn pause(&self) -> Result<()> {
            self.calls.borrow_mut().push(EngineCall::Pause);
            Ok(())
        }

        fn stop(&self) -> Result<()> {
            self.calls.borrow_mut().push(EngineCall::Stop);
            Ok(())
        }

        fn seek_to(&self, position: f64) -> Result<()> {
            self.calls.borrow_mut().push(EngineCall::SeekTo(position));
            Ok(())
        }

        fn adjust_volume(&self, delta: i32) -> Result<()> {
            self.calls.borrow_mut().push(EngineCall::AdjustVolume(delta));
            Ok(())
        }

        fn toggle_mute(&self) -> Result<()> {
            self.calls.borrow_mut().push(EngineCall::ToggleMute);
            Ok(())
        }
    }

    fn broadcast(id: i64) -> Broadcast {
        Broadcast::new(
            id,
            NewBroadcast {
                content_address: format!("Qm{id}"),
                title: format!("Broadcast {id}"),
                file_size_mb: 42.0,
                published: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
                artwork_address: None,
            },
        )
    }

    fn session() -> (PlaybackSession<TestEngine>, Rc<RefCell<Vec<EngineCall>>>) {
        let engine = TestEngine::default();
        let calls = Rc::clone(&engine.calls);
        let session = PlaybackSession::new(engine, "https://gw/ipfs".to_string(), 0.7);
        (session, calls)
    }

    #[test]
    fn select_loads_the_stream_paused() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();

        assert_eq!(session.state(), SessionState::Loading);
        assert!(session.is_selected(1));
        assert_eq!(
            *calls.borrow(),
            vec![EngineCall::Load("https://gw/ipfs/Qm1".to_string(), 1)]
        );

        session.on_metadata_ready(1, 300.0);
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.duration(), 300.0);
        assert_eq!(session.position(), 0.0);
    }

    #[test]
    fn play_requested_during_loading_still_lands_paused() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();

        // An eager play before the stream is ready must not queue up.
        session.play().unwrap();
        session.on_metadata_ready(1, 300.0);

        assert_eq!(session.state(), SessionState::Paused);
        assert!(!calls.borrow().contains(&EngineCall::Play));
    }

    #[test]
    fn reselecting_the_current_broadcast_loads_once() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 300.0);
        session.select(&broadcast(1)).unwrap();

        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn selecting_another_broadcast_supersedes_the_load() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.select(&broadcast(2)).unwrap();

        assert!(session.is_selected(2));
        assert_eq!(calls.borrow().len(), 2);

        // The first load reports in late and must not become ready.
        session.on_metadata_ready(1, 300.0);
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(session.duration(), 0.0);

        session.on_metadata_ready(2, 120.0);
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.duration(), 120.0);
    }

    #[test]
    fn toggle_drives_play_and_pause_through_the_engine() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 300.0);

        session.toggle_play().unwrap();
        assert_eq!(calls.borrow().last(), Some(&EngineCall::Play));
        // Still paused until the engine confirms.
        assert_eq!(session.state(), SessionState::Paused);

        session.on_playing(1);
        assert_eq!(session.state(), SessionState::Playing);

        session.toggle_play().unwrap();
        assert_eq!(calls.borrow().last(), Some(&EngineCall::Pause));
        session.on_paused(1);
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn toggle_outside_a_ready_stream_is_harmless() {
        let (mut session, calls) = session();
        session.toggle_play().unwrap();
        assert!(calls.borrow().is_empty());

        session.select(&broadcast(1)).unwrap();
        session.toggle_play().unwrap();
        // The pending toggle must not turn the ready stream into autoplay.
        session.on_metadata_ready(1, 300.0);
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn seek_clamps_to_the_stream_bounds() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 300.0);

        session.seek(-5.0).unwrap();
        assert_eq!(session.position(), 0.0);

        session.seek(400.0).unwrap();
        assert_eq!(session.position(), 300.0);

        assert_eq!(
            &calls.borrow()[1..],
            &[EngineCall::SeekTo(0.0), EngineCall::SeekTo(300.0)]
        );
    }

    #[test]
    fn seek_is_ignored_before_the_stream_is_ready() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.seek(30.0).unwrap();
        assert_eq!(calls.borrow().len(), 1);
        assert_eq!(session.position(), 0.0);
    }

    #[test]
    fn relative_seek_moves_the_clock() {
        let (mut session, _calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 300.0);
        session.on_playing(1);
        session.on_time_update(1, 100.0, 300.0);

        session.seek_by(20.0).unwrap();
        assert_eq!(session.position(), 120.0);

        session.seek_by(-500.0).unwrap();
        assert_eq!(session.position(), 0.0);
    }

    #[test]
    fn time_updates_only_land_on_the_current_generation() {
        let (mut session, _calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 300.0);
        session.on_playing(1);

        session.on_time_update(1, 42.0, 300.0);
        assert_eq!(session.position(), 42.0);

        session.select(&broadcast(2)).unwrap();
        session.on_time_update(1, 99.0, 300.0);
        assert_eq!(session.position(), 0.0);
    }

    #[test]
    fn end_of_stream_parks_paused_at_the_duration() {
        let (mut session, _calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 300.0);
        session.on_playing(1);
        session.on_time_update(1, 299.0, 300.0);

        session.on_end_reached(1);
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.position(), 300.0);
        assert!(session.is_selected(1));
    }

    #[test]
    fn engine_failure_enters_errored_and_keeps_the_selection() {
        let (mut session, _calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_error(1, "no decoder for stream".to_string());

        assert_eq!(session.state(), SessionState::Errored);
        assert!(session.is_selected(1));
        assert!(matches!(
            session.last_error(),
            Some(ArchiveError::PlaybackFailure(_))
        ));
    }

    #[test]
    fn stale_errors_from_superseded_loads_are_dropped() {
        let (mut session, _calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.select(&broadcast(2)).unwrap();

        session.on_error(1, "gateway timeout".to_string());
        assert_eq!(session.state(), SessionState::Loading);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn retry_after_an_error_issues_a_fresh_load() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_error(1, "gateway timeout".to_string());

        session.retry().unwrap();
        assert_eq!(session.state(), SessionState::Loading);
        assert!(session.last_error().is_none());
        assert_eq!(
            calls.borrow().last(),
            Some(&EngineCall::Load("https://gw/ipfs/Qm1".to_string(), 2))
        );

        session.on_metadata_ready(2, 300.0);
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn reselecting_an_errored_broadcast_reloads_it() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.on_error(1, "gateway timeout".to_string());

        session.select(&broadcast(1)).unwrap();
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn stop_clears_the_selection_and_invalidates_callbacks() {
        let (mut session, calls) = session();
        session.select(&broadcast(1)).unwrap();
        session.stop().unwrap();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.selected().is_none());
        assert_eq!(calls.borrow().last(), Some(&EngineCall::Stop));

        // The stopped load reports in late; the session stays idle.
        session.on_metadata_ready(1, 300.0);
        assert_eq!(session.state(), SessionState::Idle);

        // Stopping twice does not reach the engine again.
        session.stop().unwrap();
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn volume_reports_are_device_state_and_never_stale() {
        let (mut session, calls) = session();
        assert_eq!(session.volume(), 0.7);

        session.adjust_volume(5).unwrap();
        assert_eq!(calls.borrow().last(), Some(&EngineCall::AdjustVolume(5)));

        session.on_volume(0.75);
        assert_eq!(session.volume(), 0.75);

        session.toggle_mute().unwrap();
        session.on_mute(true);
        assert!(session.muted());

        session.on_volume(3.0);
        assert_eq!(session.volume(), 1.0);
    }

    #[test]
    fn progress_tracks_the_clock() {
        let (mut session, _calls) = session();
        assert_eq!(session.progress(), 0.0);

        session.select(&broadcast(1)).unwrap();
        session.on_metadata_ready(1, 200.0);
        session.on_playing(1);
        session.on_time_update(1, 50.0, 200.0);
        assert_eq!(session.progress(), 0.25);
    }
}
