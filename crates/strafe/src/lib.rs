//! Strafe: record, store and replay movement trajectories.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! strafe sub-crates. For most users, adding `strafe` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use strafe::prelude::*;
//!
//! // Record a few ticks for one player.
//! let mut recorder = Recorder::new(CaptureConfig::default()).unwrap();
//! let player = ParticipantId(1);
//! recorder.start(player);
//! for i in 0..8 {
//!     let sample = TickSample {
//!         frame_time: 0.03125,
//!         origin: [i as f32 * 10.0, 0.0, 36.0],
//!         buttons: Buttons::FORWARD,
//!         on_ground: true,
//!         gravity: 1.0,
//!         ..TickSample::default()
//!     };
//!     recorder.on_tick(player, &sample);
//! }
//! let info = HeaderInfo { map: "bhop_easy".into(), ..HeaderInfo::default() };
//! let replay = recorder.take_replay(player, info).unwrap();
//!
//! // Round-trip it through the wire format.
//! let bytes = replay.to_bytes(&CodecConfig::default()).unwrap();
//! let decoded = Replay::decode(&bytes, &CodecConfig::default()).unwrap();
//! assert_eq!(decoded, replay);
//!
//! // Play it back in game units.
//! let mut library = ReplayLibrary::new();
//! library.insert(decoded);
//! assert_eq!(library.frame(0).unwrap().origin[2], 36.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`replay`] | `strafe-replay` | Frame and header codec, replay container, streaming reader/writer |
//! | [`capture`] | `strafe-capture` | Tick sampling, strafe statistics, per-participant recorder |
//! | [`playback`] | `strafe-playback` | Loaded-replay library and un-scaled views |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Binary replay codec (`strafe-replay`).
///
/// [`replay::Replay`] owns a header and frames and drives whole-file round
/// trips; [`replay::ReplayWriter`] and [`replay::ReplayReader`] stream them.
pub use strafe_replay as replay;

/// Movement capture (`strafe-capture`).
///
/// [`capture::Recorder`] turns per-tick [`capture::TickSample`]s into
/// replay frames for any number of participants.
pub use strafe_capture as capture;

/// Playback library (`strafe-playback`).
///
/// [`playback::ReplayLibrary`] holds loaded replays and hands out
/// [`playback::FrameView`]s in game units.
pub use strafe_playback as playback;

/// Common imports for typical strafe usage.
///
/// ```rust
/// use strafe::prelude::*;
/// ```
pub mod prelude {
    // Codec
    pub use strafe_replay::{
        Buttons, CodecConfig, EmptyReplayPolicy, Frame, Header, Replay, ReplayError,
        ReplayReader, ReplayWriter, RleTimestamp,
    };

    // Capture
    pub use strafe_capture::{
        CaptureConfig, CaptureError, HeaderInfo, JumpStats, ParticipantId, Recorder, TickSample,
    };

    // Playback
    pub use strafe_playback::{FrameView, HeaderView, PlaybackError, ReplayLibrary};
}
