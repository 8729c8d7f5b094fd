//! Playback side of strafe replays.
//!
//! A [`ReplayLibrary`] holds every replay loaded for playback plus a cursor
//! naming the current one. Frames and headers leave the library as
//! [`FrameView`] / [`HeaderView`], with the fixed-point scaling undone.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod library;
pub mod view;

pub use error::PlaybackError;
pub use library::ReplayLibrary;
pub use view::{FrameView, HeaderView};
