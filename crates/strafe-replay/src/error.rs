//! Error types for the replay codec.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::HEADER_SIZE;

/// Errors that can occur while encoding, decoding, saving or loading a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// An I/O error occurred while writing to a sink or reading from a source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A replay file could not be opened or created.
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The source holds fewer bytes than a complete header.
    #[error("truncated header: got {found} of {} bytes", HEADER_SIZE)]
    TruncatedHeader {
        /// Number of bytes actually available.
        found: usize,
    },
    /// A frame record could not be decoded (truncated or corrupt data).
    #[error("malformed frame {index} at byte offset {offset}: {detail}")]
    MalformedFrame {
        /// Zero-based position of the frame within the stream.
        index: usize,
        /// Byte offset of the frame record within the stream.
        offset: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// Encoding a replay with no frames under [`EmptyReplayPolicy::Reject`].
    ///
    /// [`EmptyReplayPolicy::Reject`]: crate::EmptyReplayPolicy::Reject
    #[error("replay has no frames")]
    EmptyReplay,
    /// A codec configuration value is invalid.
    #[error("invalid codec config: {reason}")]
    InvalidConfig {
        /// Which invariant was violated.
        reason: String,
    },
}

impl ReplayError {
    /// Builds a [`ReplayError::MalformedFrame`] with no position attached.
    ///
    /// Frame-level decoders don't know where they sit in the stream; the
    /// reader fills in `index` and `offset` via [`ReplayError::at_frame`].
    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedFrame {
            index: 0,
            offset: 0,
            detail: detail.into(),
        }
    }

    /// Attaches the stream position to a frame-level decode error.
    pub(crate) fn at_frame(self, index: usize, offset: usize) -> Self {
        match self {
            Self::MalformedFrame { detail, .. } => Self::MalformedFrame {
                index,
                offset,
                detail,
            },
            other => other,
        }
    }
}
