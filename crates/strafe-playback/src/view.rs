//! Un-scaled views of frames and headers.
//!
//! Replays store positions ×4, angles ×5 and fps ÷4. These views hand the
//! values back in game units; nowhere else undoes the scaling.

use serde::Serialize;
use strafe_replay::{Frame, Header, ANGLE_SCALE, ORIGIN_SCALE};

/// Multiplier that restores the fps reading stored in a frame.
pub const FPS_SCALE: u32 = 4;

/// One frame in game units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameView {
    /// Milliseconds since the previous frame.
    pub timestamp: u32,
    /// World position.
    pub origin: [f32; 3],
    /// Pitch and yaw in degrees.
    pub angles: [f32; 2],
    /// Horizontal speed.
    pub speed: i32,
    /// Tick rate at capture time.
    pub fps: u32,
    /// Raw 16-bit button mask.
    pub keys: u16,
    /// Strafe count of the last landed jump.
    pub strafes: u32,
    /// Sync of the last landed jump.
    pub sync: u32,
    /// Player was on the ground.
    pub grounded: bool,
    /// Normal gravity was in effect.
    pub gravity: bool,
}

impl From<&Frame> for FrameView {
    fn from(frame: &Frame) -> Self {
        Self {
            timestamp: u32::from(frame.timestamp),
            origin: frame.origin.map(|v| f32::from(v) / ORIGIN_SCALE),
            angles: frame.angles.map(|v| f32::from(v) / ANGLE_SCALE),
            speed: i32::from(frame.speed),
            fps: u32::from(frame.fps) * FPS_SCALE,
            keys: frame.keys.bits(),
            strafes: u32::from(frame.strafes),
            sync: u32::from(frame.sync),
            grounded: frame.grounded,
            gravity: frame.gravity,
        }
    }
}

/// Replay metadata as shown to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    /// Recording time, Unix seconds.
    pub timestamp: u64,
    /// Format version.
    pub version: u16,
    /// Map name.
    pub map: String,
    /// Elapsed run time in milliseconds.
    pub time_ms: u32,
    /// Player name.
    pub name: String,
    /// Player identity.
    pub identity: String,
    /// Free-form annotation.
    pub info: String,
}

impl From<&Header> for HeaderView {
    fn from(header: &Header) -> Self {
        Self {
            timestamp: header.timestamp,
            version: header.version,
            map: header.map.clone(),
            time_ms: header.time,
            name: header.name.clone(),
            identity: header.identity.clone(),
            info: header.info.clone(),
        }
    }
}
