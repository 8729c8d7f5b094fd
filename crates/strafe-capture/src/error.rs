//! Error types for capture and recording.

use strafe_replay::ReplayError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::recorder::ParticipantId;

/// Errors from [`Recorder`](crate::Recorder) operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The recorder was built from an invalid config.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Encoding or writing the replay failed.
    #[error(transparent)]
    Replay(#[from] ReplayError),
    /// No state exists for this participant.
    #[error("participant {0} has never been recorded")]
    UnknownParticipant(ParticipantId),
}

/// Errors from [`parse_run_time`](crate::parse_run_time).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TimeFormatError {
    /// The text does not end in `s`.
    #[error("run time {input:?} must end with 's'")]
    MissingSuffix {
        /// The rejected text.
        input: String,
    },
    /// The `:` and `.` separators are missing or out of order.
    #[error("run time {input:?} is not in M:SS.mmms form")]
    MissingSeparators {
        /// The rejected text.
        input: String,
    },
    /// A component is not a non-negative integer.
    #[error("run time component {part:?} is not a number")]
    InvalidNumber {
        /// The offending component.
        part: String,
    },
    /// The total does not fit in 32 bits of milliseconds.
    #[error("run time {input:?} is too long")]
    Overflow {
        /// The rejected text.
        input: String,
    },
}
