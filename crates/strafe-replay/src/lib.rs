//! Delta-compressed binary codec for movement trajectory replays.
//!
//! Records a player's trajectory as a sequence of fixed-point movement
//! snapshots ([`Frame`]) behind a fixed-size metadata block ([`Header`]),
//! and stores it compactly: the first frame is written in full, every
//! later frame as a bit-flagged delta against its predecessor, and frames
//! with no positional or angular change collapse to a 3-byte marker.
//!
//! # Architecture
//!
//! - [`codec`] holds the big-endian scalar helpers shared by every record
//! - [`keys`] compacts the 16-bit button mask into one stored byte
//! - [`angle`] folds angle arithmetic into the cyclic 1800-unit domain
//! - [`Frame`] encodes/decodes one snapshot, fully or as a delta
//! - [`Header`] encodes/decodes the 133-byte metadata block
//! - [`ReplayWriter`] streams a header and frames to any `Write` sink
//! - [`ReplayReader`] decodes frames one by one from an in-memory buffer
//! - [`Replay`] owns a header plus frames and drives whole-file round trips
//!
//! # Format
//!
//! ```text
//! [Header: 133 bytes] [Frame 0: full, 20 bytes] [Frame 1..N: delta, 3..20 bytes]
//! ```
//!
//! There is no magic number and no checksum: a file is valid exactly when
//! the frame stream ends on a frame boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod angle;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod header;
pub mod keys;
pub mod reader;
pub mod replay;
pub mod writer;

pub use config::{CodecConfig, EmptyReplayPolicy, RleTimestamp};
pub use error::ReplayError;
pub use frame::{Decoded, Frame, FrameFlags, FrameKind};
pub use header::Header;
pub use keys::{Buttons, CompactKeys};
pub use reader::{FrameIter, ReplayReader};
pub use replay::{EncodeSummary, Replay};
pub use writer::ReplayWriter;

/// Size in bytes of the encoded [`Header`] block.
pub const HEADER_SIZE: usize = 133;

/// Size in bytes of a fully encoded [`Frame`].
pub const FULL_FRAME_SIZE: usize = 20;

/// Size in bytes of the flags word that opens every frame record.
pub const FLAGS_SIZE: usize = 3;

/// Format version written by recorders in this workspace.
pub const FORMAT_VERSION: u16 = 100;

/// Fixed-point scale applied to world positions.
pub const ORIGIN_SCALE: f32 = 4.0;

/// Fixed-point scale applied to view angles.
pub const ANGLE_SCALE: f32 = 5.0;
