//! Per-participant recording.
//!
//! [`Recorder`] keeps one capture state per participant: its recording
//! switch, captured frames, sample gate, fps counter and strafe tracker.
//! Participants are created on first use and kept in insertion order.

use std::fmt;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use indexmap::IndexMap;
use strafe_replay::{CodecConfig, EncodeSummary, Frame, Header, Replay};

use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::sample::{quantize, CaptureStats, TickSample};
use crate::stats::{JumpStats, StrafeTracker};
use crate::timing::{FpsCounter, SampleGate};

/// Identifies one player slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Header text supplied when a recording is finished.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Map the run was recorded on.
    pub map: String,
    /// Player display name.
    pub name: String,
    /// Player account identity.
    pub identity: String,
    /// Free-form annotation.
    pub info: String,
    /// Elapsed run time in milliseconds.
    pub time_ms: u32,
}

/// What one call to [`Recorder::on_tick`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// The frame appended to the recording, if the tick was sampled.
    pub captured: Option<Frame>,
    /// Statistics of a jump that landed on this tick.
    pub landing: Option<JumpStats>,
}

#[derive(Clone, Debug)]
struct ParticipantState {
    recording: bool,
    frames: Vec<Frame>,
    gate: SampleGate,
    fps: FpsCounter,
    tracker: StrafeTracker,
}

impl ParticipantState {
    fn new(config: &CaptureConfig) -> Self {
        Self {
            recording: false,
            frames: Vec::new(),
            gate: SampleGate::new(config.sample_interval_ms()),
            fps: FpsCounter::new(config.fps_window_ms),
            tracker: StrafeTracker::new(),
        }
    }
}

/// Records movement for any number of participants.
#[derive(Clone, Debug)]
pub struct Recorder {
    config: CaptureConfig,
    participants: IndexMap<ParticipantId, ParticipantState>,
}

impl Recorder {
    /// Create a recorder after validating `config`.
    pub fn new(config: CaptureConfig) -> Result<Self, CaptureError> {
        config.validate()?;
        Ok(Self {
            config,
            participants: IndexMap::new(),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    fn state_mut(&mut self, id: ParticipantId) -> &mut ParticipantState {
        let config = &self.config;
        self.participants
            .entry(id)
            .or_insert_with(|| ParticipantState::new(config))
    }

    /// Start a fresh recording, discarding any captured frames.
    pub fn start(&mut self, id: ParticipantId) {
        let state = self.state_mut(id);
        state.frames.clear();
        state.gate.reset();
        state.recording = true;
        tracing::info!(participant = %id, "recording started");
    }

    /// Stop recording. Captured frames are kept.
    pub fn stop(&mut self, id: ParticipantId) {
        if let Some(state) = self.participants.get_mut(&id) {
            state.recording = false;
            tracing::info!(participant = %id, frames = state.frames.len(), "recording stopped");
        }
    }

    /// Whether `id` is currently recording.
    pub fn is_recording(&self, id: ParticipantId) -> bool {
        self.participants.get(&id).is_some_and(|s| s.recording)
    }

    /// Frames captured for `id` so far.
    pub fn frame_count(&self, id: ParticipantId) -> usize {
        self.participants.get(&id).map_or(0, |s| s.frames.len())
    }

    /// Participants with capture state, in first-seen order.
    pub fn participants(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.participants.keys().copied()
    }

    /// Feed one movement tick for `id`.
    ///
    /// Ignored entirely when the participant is dead or not recording.
    pub fn on_tick(&mut self, id: ParticipantId, sample: &TickSample) -> TickOutcome {
        let fps_divisor = self.config.fps_divisor;
        let Some(state) = self.participants.get_mut(&id) else {
            return TickOutcome::default();
        };
        if sample.dead || !state.recording {
            return TickOutcome::default();
        }

        let landing = state.tracker.update(sample);
        if let Some(stats) = &landing {
            tracing::debug!(
                participant = %id,
                strafes = stats.strafes,
                sync = stats.sync,
                gain = stats.gain,
                "jump landed"
            );
        }

        let frame_time_ms = sample.frame_time_ms();
        let fps = state.fps.tick(frame_time_ms);
        let captured = state.gate.tick(frame_time_ms).map(|timestamp| {
            let stats = CaptureStats {
                fps: fps / fps_divisor,
                strafes: state.tracker.strafes(),
                sync: state.tracker.sync(),
            };
            let frame = quantize(sample, timestamp, stats);
            state.frames.push(frame);
            frame
        });

        TickOutcome { captured, landing }
    }

    /// Stop recording and hand over the captured frames as a replay.
    ///
    /// The header carries the configured format version and the current
    /// Unix time. The participant's frame buffer is left empty.
    pub fn take_replay(
        &mut self,
        id: ParticipantId,
        info: HeaderInfo,
    ) -> Result<Replay, CaptureError> {
        let version = self.config.format_version;
        let state = self
            .participants
            .get_mut(&id)
            .ok_or(CaptureError::UnknownParticipant(id))?;
        state.recording = false;
        let frames = std::mem::take(&mut state.frames);

        let header = Header {
            timestamp: unix_now(),
            version,
            map: info.map,
            time: info.time_ms,
            name: info.name,
            identity: info.identity,
            info: info.info,
        };
        Ok(Replay::with_frames(header, frames))
    }

    /// Finish the recording for `id` and save it to `path`.
    ///
    /// If the save fails the captured frames and the recording switch are
    /// restored, so the call can be retried.
    pub fn save(
        &mut self,
        id: ParticipantId,
        path: impl AsRef<Path>,
        info: HeaderInfo,
        codec: &CodecConfig,
    ) -> Result<EncodeSummary, CaptureError> {
        let path = path.as_ref();
        let was_recording = self.is_recording(id);
        let replay = self.take_replay(id, info)?;
        match replay.save(path, codec) {
            Ok(summary) => {
                tracing::info!(
                    participant = %id,
                    frames = summary.frames_written,
                    path = %path.display(),
                    "recording saved"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::warn!(
                    participant = %id,
                    path = %path.display(),
                    error = %e,
                    "save failed, frames kept"
                );
                let (_, frames) = replay.into_parts();
                let state = self.state_mut(id);
                state.frames = frames;
                state.recording = was_recording;
                Err(e.into())
            }
        }
    }

    /// Drop all participant state, e.g. on a level change.
    pub fn reset(&mut self) {
        tracing::debug!(participants = self.participants.len(), "recorder reset");
        self.participants.clear();
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}
