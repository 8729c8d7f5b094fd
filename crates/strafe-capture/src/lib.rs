//! Per-tick movement capture for strafe replays.
//!
//! Turns the game state reported on every movement tick into replay
//! [`Frame`](strafe_replay::Frame)s:
//!
//! - [`SampleGate`] thins ticks down to the configured sample rate
//! - [`FpsCounter`] measures the client tick rate over a sliding window
//! - [`StrafeTracker`] accumulates per-jump strafe and sync statistics
//! - [`quantize`] converts a [`TickSample`] to fixed-point frame fields
//! - [`Recorder`] owns all of the above per participant and builds replays

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod recorder;
pub mod sample;
pub mod stats;
pub mod time;
pub mod timing;

pub use config::{CaptureConfig, ConfigError};
pub use error::{CaptureError, TimeFormatError};
pub use recorder::{HeaderInfo, ParticipantId, Recorder, TickOutcome};
pub use sample::{quantize, CaptureStats, TickSample};
pub use stats::{JumpStats, StrafeTracker, MAX_TRACKED_STRAFES};
pub use time::parse_run_time;
pub use timing::{FpsCounter, SampleGate};
