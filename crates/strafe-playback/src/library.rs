//! The set of replays loaded for playback.

use std::path::Path;

use strafe_replay::{CodecConfig, Replay};

use crate::error::PlaybackError;
use crate::view::{FrameView, HeaderView};

/// Loaded replays plus a cursor naming the current one.
///
/// The cursor always points at a loaded replay while the library is
/// non-empty, and is 0 when it is empty.
#[derive(Debug, Default)]
pub struct ReplayLibrary {
    replays: Vec<Replay>,
    current: usize,
    codec: CodecConfig,
}

impl ReplayLibrary {
    /// An empty library decoding with default codec settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty library decoding with `codec`.
    pub fn with_config(codec: CodecConfig) -> Self {
        Self {
            codec,
            ..Self::default()
        }
    }

    /// Decode the file at `path`, append it and make it current.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<HeaderView, PlaybackError> {
        let path = path.as_ref();
        let replay = Replay::load(path, &self.codec)?;
        let view = self.insert(replay);
        tracing::debug!(
            path = %path.display(),
            index = self.current,
            "replay added to library"
        );
        Ok(view)
    }

    /// Append an in-memory replay and make it current.
    pub fn insert(&mut self, replay: Replay) -> HeaderView {
        let view = HeaderView::from(replay.header());
        self.replays.push(replay);
        self.current = self.replays.len() - 1;
        view
    }

    /// Number of loaded replays.
    pub fn len(&self) -> usize {
        self.replays.len()
    }

    /// No replays loaded.
    pub fn is_empty(&self) -> bool {
        self.replays.is_empty()
    }

    /// Index of the current replay.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current replay.
    pub fn current(&self) -> Option<&Replay> {
        self.replays.get(self.current)
    }

    /// Header of the current replay.
    pub fn header(&self) -> Option<HeaderView> {
        self.current().map(|r| HeaderView::from(r.header()))
    }

    /// Select replay `index`. Out-of-range indices wrap to the first replay.
    pub fn set_current(&mut self, index: usize) -> Result<(), PlaybackError> {
        if self.replays.is_empty() {
            return Err(PlaybackError::Empty);
        }
        self.current = if index < self.replays.len() { index } else { 0 };
        Ok(())
    }

    /// Advance to the next replay, wrapping after the last. Returns the new index.
    pub fn next_replay(&mut self) -> Result<usize, PlaybackError> {
        if self.replays.is_empty() {
            return Err(PlaybackError::Empty);
        }
        self.current = (self.current + 1) % self.replays.len();
        Ok(self.current)
    }

    /// Remove replay `index`. The last remaining replay becomes current.
    pub fn delete(&mut self, index: usize) -> Result<Replay, PlaybackError> {
        if self.replays.is_empty() {
            return Err(PlaybackError::Empty);
        }
        if index >= self.replays.len() {
            return Err(PlaybackError::ReplayOutOfRange {
                index,
                len: self.replays.len(),
            });
        }
        let removed = self.replays.remove(index);
        self.current = self.replays.len().saturating_sub(1);
        tracing::debug!(index, remaining = self.replays.len(), "replay deleted");
        Ok(removed)
    }

    /// Frame `index` of the current replay.
    pub fn frame(&self, index: usize) -> Result<FrameView, PlaybackError> {
        let replay = self.current().ok_or(PlaybackError::Empty)?;
        replay
            .frames()
            .get(index)
            .map(FrameView::from)
            .ok_or(PlaybackError::FrameOutOfRange {
                index,
                len: replay.len(),
            })
    }

    /// Frames in the current replay, 0 when empty.
    pub fn frame_count(&self) -> usize {
        self.current().map_or(0, Replay::len)
    }

    /// Drop every replay, e.g. on a level change.
    pub fn clear(&mut self) {
        self.replays.clear();
        self.current = 0;
    }
}
