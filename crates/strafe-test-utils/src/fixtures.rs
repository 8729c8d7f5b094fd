//! Reusable trajectories and proptest strategies.
//!
//! Every trajectory here round-trips exactly: frames with unchanged
//! origin and angles are exact copies of their predecessor, and only
//! recorded buttons are held.

use proptest::prelude::*;
use strafe_replay::{Buttons, Frame};

use crate::FrameBuilder;

/// A strafe-jumping run of `len` frames.
///
/// Alternates left and right strafes every eight frames, leaves the
/// ground every 40 frames, and turns the yaw steadily across the ±180°
/// seam.
pub fn bhop_run(len: usize) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(len);
    let mut yaw: i32 = 700;
    let mut speed: i16 = 1000;
    for i in 0..len {
        let left = (i / 8) % 2 == 0;
        let keys = if left {
            Buttons::FORWARD | Buttons::MOVELEFT
        } else {
            Buttons::FORWARD | Buttons::MOVERIGHT
        };
        yaw += if left { 7 } else { 5 };
        if yaw > 900 {
            yaw -= 1800;
        }
        speed = speed.saturating_add(3);
        let frame = FrameBuilder::new()
            .timestamp(16 + (i % 2) as u8)
            .origin(
                (i as i16).wrapping_mul(12),
                (i as i16).wrapping_mul(-5),
                64 + ((i % 40) as i16 - 20).abs() * 4,
            )
            .angles(-(i as i16 % 30), yaw as i16)
            .speed(speed)
            .keys(keys)
            .stats((i / 8) as u8, (50 + i % 50) as u8)
            .grounded(i % 40 == 0)
            .build();
        frames.push(frame);
    }
    frames
}

/// Repeat every `every`-th frame `pause` extra times, as a player standing
/// still would produce.
pub fn with_pauses(frames: &[Frame], every: usize, pause: usize) -> Vec<Frame> {
    let mut out = Vec::with_capacity(frames.len() + frames.len() / every.max(1) * pause);
    for (i, frame) in frames.iter().enumerate() {
        out.push(*frame);
        if every > 0 && i % every == 0 {
            out.extend(std::iter::repeat(*frame).take(pause));
        }
    }
    out
}

/// Two frames turning from 850 to -850 yaw (a 20° turn across the seam).
pub fn seam_turn() -> [Frame; 2] {
    let a = FrameBuilder::new().angles(0, 850).build();
    let b = FrameBuilder::from_frame(a).angles(0, -850).nudge(4, 0, 0).build();
    [a, b]
}

/// Any frame whose keys survive compaction and whose angles sit inside
/// the open cyclic domain.
pub fn arb_frame() -> impl Strategy<Value = Frame> {
    (
        any::<u8>(),
        any::<[i16; 3]>(),
        [-899i16..=899, -899i16..=899],
        any::<i16>(),
        any::<u16>(),
        any::<[u8; 3]>(),
        any::<[bool; 2]>(),
    )
        .prop_map(
            |(timestamp, origin, angles, speed, keys, [fps, strafes, sync], [grounded, gravity])| {
                Frame {
                    timestamp,
                    origin,
                    angles,
                    speed,
                    keys: Buttons::from_bits_retain(keys).recorded(),
                    fps,
                    strafes,
                    sync,
                    grounded,
                    gravity,
                }
            },
        )
}

/// A frame sequence in which any frame without motion is an exact copy of
/// its predecessor, so the stream decodes back to itself.
pub fn arb_trajectory(max_len: usize) -> impl Strategy<Value = Vec<Frame>> {
    prop::collection::vec((arb_frame(), any::<bool>()), 0..max_len).prop_map(|steps| {
        let mut frames: Vec<Frame> = Vec::with_capacity(steps.len());
        for (frame, repeat) in steps {
            let next = match frames.last() {
                Some(prev) if repeat => *prev,
                Some(prev) if prev.origin == frame.origin && prev.angles == frame.angles => *prev,
                _ => frame,
            };
            frames.push(next);
        }
        frames
    })
}
