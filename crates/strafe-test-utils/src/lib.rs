//! Test fixtures for strafe development.
//!
//! Provides a [`FrameBuilder`] for terse frame construction, canned
//! [`Header`]s, and in [`fixtures`] whole trajectories plus proptest
//! strategies for replay-level tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{arb_frame, arb_trajectory, bhop_run, seam_turn, with_pauses};

use strafe_replay::{Buttons, Frame, Header};

/// The header used throughout the codec tests.
pub fn sample_header() -> Header {
    Header {
        timestamp: 1_700_000_000,
        version: 100,
        map: "de_dust2".into(),
        time: 5000,
        name: "Player".into(),
        identity: "STEAM_0:1:12345".into(),
        info: "surf".into(),
    }
}

/// Builder for [`Frame`] values.
///
/// Starts from an airborne, normal-gravity frame at the origin sampled
/// at 16 ms / 100 fps.
#[derive(Clone, Copy, Debug)]
pub struct FrameBuilder {
    frame: Frame,
}

impl FrameBuilder {
    pub fn new() -> Self {
        Self {
            frame: Frame {
                timestamp: 16,
                fps: 25,
                gravity: true,
                ..Frame::default()
            },
        }
    }

    /// Continue from an existing frame.
    pub fn from_frame(frame: Frame) -> Self {
        Self { frame }
    }

    pub fn timestamp(mut self, ms: u8) -> Self {
        self.frame.timestamp = ms;
        self
    }

    pub fn origin(mut self, x: i16, y: i16, z: i16) -> Self {
        self.frame.origin = [x, y, z];
        self
    }

    /// Shift the origin by the given amount (wrapping).
    pub fn nudge(mut self, dx: i16, dy: i16, dz: i16) -> Self {
        let [x, y, z] = self.frame.origin;
        self.frame.origin = [x.wrapping_add(dx), y.wrapping_add(dy), z.wrapping_add(dz)];
        self
    }

    pub fn angles(mut self, pitch: i16, yaw: i16) -> Self {
        self.frame.angles = [pitch, yaw];
        self
    }

    pub fn speed(mut self, speed: i16) -> Self {
        self.frame.speed = speed;
        self
    }

    pub fn keys(mut self, keys: Buttons) -> Self {
        self.frame.keys = keys;
        self
    }

    pub fn fps(mut self, fps: u8) -> Self {
        self.frame.fps = fps;
        self
    }

    pub fn stats(mut self, strafes: u8, sync: u8) -> Self {
        self.frame.strafes = strafes;
        self.frame.sync = sync;
        self
    }

    pub fn grounded(mut self, grounded: bool) -> Self {
        self.frame.grounded = grounded;
        self
    }

    pub fn gravity(mut self, gravity: bool) -> Self {
        self.frame.gravity = gravity;
        self
    }

    pub fn build(self) -> Frame {
        self.frame
    }
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}
