//! Error types for the playback library.

use strafe_replay::ReplayError;
use thiserror::Error;

/// Errors from [`ReplayLibrary`](crate::ReplayLibrary) operations.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Loading or decoding a replay failed.
    #[error(transparent)]
    Replay(#[from] ReplayError),
    /// The library holds no replays.
    #[error("no replays loaded")]
    Empty,
    /// A replay index past the end of the library.
    #[error("replay {index} out of range (library holds {len})")]
    ReplayOutOfRange {
        /// Requested index.
        index: usize,
        /// Replays loaded.
        len: usize,
    },
    /// A frame index past the end of the current replay.
    #[error("frame {index} out of range (replay has {len})")]
    FrameOutOfRange {
        /// Requested index.
        index: usize,
        /// Frames in the current replay.
        len: usize,
    },
}
