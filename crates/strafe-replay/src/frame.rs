//! Movement snapshots and their full/delta wire records.
//!
//! A frame record opens with a 24-bit flags word. The first frame of a
//! stream is written in full (20 bytes). Every later frame is written as a
//! delta against its predecessor: numeric fields as signed 1- or 2-byte
//! differences, the small counters only when they changed, and nothing at
//! all beyond the flags when position and view are unchanged.
//!
//! ```text
//! full:  [flags:3][ts:1][origin:2×3][angles:2×2][speed:2][keys:1][fps:1][strafes:1][sync:1]
//! delta: [flags:3][dts:1][origin:1|2 ×3][angles:1|2 ×2][speed:1|2][keys?][fps?][strafes?][sync?]
//! rle:   [flags:3]
//! ```

use std::io::Write;

use bitflags::bitflags;

use crate::angle;
use crate::codec::{
    read_i16_be, read_i8, read_u24_be, read_u8, write_i16_be, write_i8, write_u24_be, write_u8,
};
use crate::config::RleTimestamp;
use crate::error::ReplayError;
use crate::keys::{Buttons, CompactKeys};
use crate::{FLAGS_SIZE, FULL_FRAME_SIZE};

/// Largest magnitude a 1-byte signed delta carries.
pub const NARROW_DELTA_MAX: u32 = i8::MAX as u32;

bitflags! {
    /// The 24-bit flags word at the start of every frame record.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FrameFlags: u32 {
        /// Position and view unchanged; the record ends after the flags.
        const RLE = 1 << 0;
        /// Origin x delta stored in 2 bytes.
        const ORIGIN_X_WIDE = 1 << 1;
        /// Origin y delta stored in 2 bytes.
        const ORIGIN_Y_WIDE = 1 << 2;
        /// Origin z delta stored in 2 bytes.
        const ORIGIN_Z_WIDE = 1 << 3;
        /// Pitch (`angles[0]`) delta stored in 2 bytes.
        const PITCH_WIDE = 1 << 4;
        /// Yaw (`angles[1]`) delta stored in 2 bytes.
        const YAW_WIDE = 1 << 5;
        /// Speed delta stored in 2 bytes.
        const SPEED_WIDE = 1 << 6;
        /// Compacted keys byte present.
        const KEYS_CHANGED = 1 << 7;
        /// Fps byte present.
        const FPS_CHANGED = 1 << 8;
        /// Strafes byte present.
        const STRAFES_CHANGED = 1 << 9;
        /// Sync byte present.
        const SYNC_CHANGED = 1 << 10;
        /// Player was on the ground.
        const GROUNDED = 1 << 11;
        /// Normal gravity was in effect.
        const GRAVITY = 1 << 12;
    }
}

impl FrameFlags {
    /// Bits 0–10, set on every full record and ignored when reading one.
    pub const FULL_MARKER: FrameFlags = FrameFlags::from_bits_retain(0x7FF);

    const ORIGIN_WIDE: [FrameFlags; 3] = [
        FrameFlags::ORIGIN_X_WIDE,
        FrameFlags::ORIGIN_Y_WIDE,
        FrameFlags::ORIGIN_Z_WIDE,
    ];

    const ANGLE_WIDE: [FrameFlags; 2] = [FrameFlags::PITCH_WIDE, FrameFlags::YAW_WIDE];

    fn status(grounded: bool, gravity: bool) -> FrameFlags {
        let mut flags = FrameFlags::empty();
        flags.set(FrameFlags::GROUNDED, grounded);
        flags.set(FrameFlags::GRAVITY, gravity);
        flags
    }
}

/// How a frame record was stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// Absolute 20-byte record (first frame of a stream).
    Full,
    /// Run-length record: a copy of the predecessor.
    Rle,
    /// Field-wise difference against the predecessor.
    Delta,
}

/// One movement sample in fixed-point units.
///
/// # Examples
///
/// ```
/// use strafe_replay::{Buttons, Frame};
///
/// let first = Frame {
///     timestamp: 16,
///     origin: [400, -800, 144],
///     angles: [0, 450],
///     speed: 1000,
///     keys: Buttons::FORWARD,
///     fps: 25,
///     ..Frame::default()
/// };
/// let mut second = first;
/// second.origin[0] += 12;
///
/// let mut buf = Vec::new();
/// first.encode(&mut buf).unwrap();
/// second.encode_delta(&first, &mut buf).unwrap();
///
/// let a = Frame::decode(&buf, None, Default::default()).unwrap();
/// let b = Frame::decode(&buf[a.consumed..], Some(&a.frame), Default::default()).unwrap();
/// assert_eq!(b.frame, second);
/// assert_eq!(a.consumed + b.consumed, buf.len());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Milliseconds since the previous frame.
    pub timestamp: u8,
    /// World position × 4.
    pub origin: [i16; 3],
    /// Pitch and yaw × 5, in the cyclic 1800-unit domain.
    pub angles: [i16; 2],
    /// Horizontal speed × 1.
    pub speed: i16,
    /// Buttons held. Only [`Buttons::RECORDED`] survive the wire.
    pub keys: Buttons,
    /// Sampling rate observed at capture time (capture stores fps ÷ 4).
    pub fps: u8,
    /// Strafe count from the statistics accumulator.
    pub strafes: u8,
    /// Sync percentage from the statistics accumulator.
    pub sync: u8,
    /// Player was on the ground.
    pub grounded: bool,
    /// Normal gravity was in effect.
    pub gravity: bool,
}

/// Result of decoding one frame record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The reconstructed frame.
    pub frame: Frame,
    /// Bytes consumed from the input. Never zero.
    pub consumed: usize,
    /// How the record was stored.
    pub kind: FrameKind,
}

impl Frame {
    /// This frame as a decoder would see it: unrecorded buttons cleared.
    pub fn as_recorded(&self) -> Frame {
        Frame {
            keys: self.keys.recorded(),
            ..*self
        }
    }

    /// Both strafe keys held at once.
    pub fn is_overlapping(&self) -> bool {
        self.keys.is_overlapping()
    }

    /// Write the absolute 20-byte record. Returns the bytes written.
    pub fn encode(&self, w: &mut dyn Write) -> Result<usize, ReplayError> {
        let flags = FrameFlags::FULL_MARKER | FrameFlags::status(self.grounded, self.gravity);
        write_u24_be(w, flags.bits())?;
        write_u8(w, self.timestamp)?;
        for v in self.origin {
            write_i16_be(w, v)?;
        }
        for v in self.angles {
            write_i16_be(w, v)?;
        }
        write_i16_be(w, self.speed)?;
        write_u8(w, self.keys.compact().bits())?;
        write_u8(w, self.fps)?;
        write_u8(w, self.strafes)?;
        write_u8(w, self.sync)?;
        Ok(FULL_FRAME_SIZE)
    }

    /// Flags word of the delta record for this frame against `prev`.
    pub fn delta_flags(&self, prev: &Frame) -> FrameFlags {
        let deltas = Deltas::between(self, prev);
        if deltas.is_motionless() {
            return FrameFlags::RLE;
        }

        let mut flags = FrameFlags::status(self.grounded, self.gravity);
        for (i, d) in deltas.origin.iter().enumerate() {
            flags.set(FrameFlags::ORIGIN_WIDE[i], is_wide(i32::from(*d)));
        }
        for (i, d) in deltas.angles.iter().enumerate() {
            flags.set(FrameFlags::ANGLE_WIDE[i], is_wide(*d));
        }
        flags.set(FrameFlags::SPEED_WIDE, is_wide(i32::from(deltas.speed)));
        flags.set(FrameFlags::KEYS_CHANGED, self.keys != prev.keys);
        flags.set(FrameFlags::FPS_CHANGED, self.fps != prev.fps);
        flags.set(FrameFlags::STRAFES_CHANGED, self.strafes != prev.strafes);
        flags.set(FrameFlags::SYNC_CHANGED, self.sync != prev.sync);
        flags
    }

    /// Write the delta record for this frame against `prev`.
    ///
    /// `prev` is the frame as captured, not as a decoder would rebuild it.
    /// Returns the bytes written: 3 for a run-length record, otherwise 10–20.
    pub fn encode_delta(&self, prev: &Frame, w: &mut dyn Write) -> Result<usize, ReplayError> {
        let flags = self.delta_flags(prev);
        write_u24_be(w, flags.bits())?;
        if flags.contains(FrameFlags::RLE) {
            return Ok(FLAGS_SIZE);
        }

        let deltas = Deltas::between(self, prev);
        let mut written = FLAGS_SIZE;

        write_i8(w, self.timestamp.wrapping_sub(prev.timestamp) as i8)?;
        written += 1;

        for (i, d) in deltas.origin.iter().enumerate() {
            written += write_delta(w, i32::from(*d), flags.contains(FrameFlags::ORIGIN_WIDE[i]))?;
        }
        for (i, d) in deltas.angles.iter().enumerate() {
            written += write_delta(w, *d, flags.contains(FrameFlags::ANGLE_WIDE[i]))?;
        }
        written += write_delta(
            w,
            i32::from(deltas.speed),
            flags.contains(FrameFlags::SPEED_WIDE),
        )?;

        let changed = [
            (FrameFlags::KEYS_CHANGED, self.keys.compact().bits()),
            (FrameFlags::FPS_CHANGED, self.fps),
            (FrameFlags::STRAFES_CHANGED, self.strafes),
            (FrameFlags::SYNC_CHANGED, self.sync),
        ];
        for (bit, value) in changed {
            if flags.contains(bit) {
                write_u8(w, value)?;
                written += 1;
            }
        }

        Ok(written)
    }

    /// Decode one record from the start of `bytes`.
    ///
    /// With no predecessor the record must be a full 20-byte record; with
    /// one it is a delta or run-length record rebuilt on top of `prev`.
    /// Truncated input is an error, never a partial frame.
    pub fn decode(
        bytes: &[u8],
        prev: Option<&Frame>,
        rle_timestamp: RleTimestamp,
    ) -> Result<Decoded, ReplayError> {
        let mut cursor = bytes;
        let flags = FrameFlags::from_bits_retain(read_u24_be(&mut cursor, "frame flags")?);

        let (frame, kind) = match prev {
            None => (decode_full(&mut cursor, flags)?, FrameKind::Full),
            Some(prev) if flags.contains(FrameFlags::RLE) => {
                let mut frame = *prev;
                if let RleTimestamp::FrameInterval(ms) = rle_timestamp {
                    frame.timestamp = ms;
                }
                (frame, FrameKind::Rle)
            }
            Some(prev) => (decode_delta(&mut cursor, flags, prev)?, FrameKind::Delta),
        };

        Ok(Decoded {
            frame,
            consumed: bytes.len() - cursor.len(),
            kind,
        })
    }
}

/// Field differences between a frame and its predecessor.
struct Deltas {
    origin: [i16; 3],
    angles: [i32; 2],
    speed: i16,
}

impl Deltas {
    fn between(current: &Frame, prev: &Frame) -> Self {
        Self {
            origin: [0, 1, 2].map(|i| current.origin[i].wrapping_sub(prev.origin[i])),
            angles: [0, 1].map(|i| angle::delta(current.angles[i], prev.angles[i])),
            speed: current.speed.wrapping_sub(prev.speed),
        }
    }

    fn is_motionless(&self) -> bool {
        self.origin.iter().all(|d| *d == 0) && self.angles.iter().all(|d| *d == 0)
    }
}

fn is_wide(delta: i32) -> bool {
    delta.unsigned_abs() > NARROW_DELTA_MAX
}

fn write_delta(w: &mut dyn Write, delta: i32, wide: bool) -> Result<usize, ReplayError> {
    if wide {
        write_i16_be(w, delta as i16)?;
        Ok(2)
    } else {
        write_i8(w, delta as i8)?;
        Ok(1)
    }
}

fn read_delta(r: &mut &[u8], wide: bool, what: &str) -> Result<i32, ReplayError> {
    if wide {
        Ok(i32::from(read_i16_be(r, what)?))
    } else {
        Ok(i32::from(read_i8(r, what)?))
    }
}

fn decode_full(r: &mut &[u8], flags: FrameFlags) -> Result<Frame, ReplayError> {
    let timestamp = read_u8(r, "timestamp")?;
    let mut origin = [0i16; 3];
    for v in &mut origin {
        *v = read_i16_be(r, "origin")?;
    }
    let mut angles = [0i16; 2];
    for v in &mut angles {
        *v = read_i16_be(r, "angles")?;
    }
    let speed = read_i16_be(r, "speed")?;
    let keys = CompactKeys::from_bits_retain(read_u8(r, "keys")?).expand();
    let fps = read_u8(r, "fps")?;
    let strafes = read_u8(r, "strafes")?;
    let sync = read_u8(r, "sync")?;

    Ok(Frame {
        timestamp,
        origin,
        angles,
        speed,
        keys,
        fps,
        strafes,
        sync,
        grounded: flags.contains(FrameFlags::GROUNDED),
        gravity: flags.contains(FrameFlags::GRAVITY),
    })
}

fn decode_delta(r: &mut &[u8], flags: FrameFlags, prev: &Frame) -> Result<Frame, ReplayError> {
    let timestamp = prev
        .timestamp
        .wrapping_add_signed(read_i8(r, "timestamp delta")?);

    let mut origin = prev.origin;
    for (i, v) in origin.iter_mut().enumerate() {
        let d = read_delta(r, flags.contains(FrameFlags::ORIGIN_WIDE[i]), "origin delta")?;
        *v = v.wrapping_add(d as i16);
    }
    let mut angles = prev.angles;
    for (i, v) in angles.iter_mut().enumerate() {
        let d = read_delta(r, flags.contains(FrameFlags::ANGLE_WIDE[i]), "angle delta")?;
        *v = angle::apply(*v, d);
    }
    let d = read_delta(r, flags.contains(FrameFlags::SPEED_WIDE), "speed delta")?;
    let speed = prev.speed.wrapping_add(d as i16);

    let keys = if flags.contains(FrameFlags::KEYS_CHANGED) {
        CompactKeys::from_bits_retain(read_u8(r, "keys")?).expand()
    } else {
        prev.keys
    };
    let fps = read_changed(r, flags, FrameFlags::FPS_CHANGED, prev.fps, "fps")?;
    let strafes = read_changed(r, flags, FrameFlags::STRAFES_CHANGED, prev.strafes, "strafes")?;
    let sync = read_changed(r, flags, FrameFlags::SYNC_CHANGED, prev.sync, "sync")?;

    Ok(Frame {
        timestamp,
        origin,
        angles,
        speed,
        keys,
        fps,
        strafes,
        sync,
        grounded: flags.contains(FrameFlags::GROUNDED),
        gravity: flags.contains(FrameFlags::GRAVITY),
    })
}

fn read_changed(
    r: &mut &[u8],
    flags: FrameFlags,
    bit: FrameFlags,
    prev: u8,
    what: &str,
) -> Result<u8, ReplayError> {
    if flags.contains(bit) {
        read_u8(r, what)
    } else {
        Ok(prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn base() -> Frame {
        Frame {
            timestamp: 16,
            origin: [1000, -2000, 300],
            angles: [-40, 850],
            speed: 1100,
            keys: Buttons::FORWARD | Buttons::MOVELEFT,
            fps: 25,
            strafes: 3,
            sync: 80,
            grounded: false,
            gravity: true,
        }
    }

    fn full_bytes(frame: &Frame) -> Vec<u8> {
        let mut buf = Vec::new();
        frame.encode(&mut buf).unwrap();
        buf
    }

    fn delta_bytes(frame: &Frame, prev: &Frame) -> Vec<u8> {
        let mut buf = Vec::new();
        let n = frame.encode_delta(prev, &mut buf).unwrap();
        assert_eq!(n, buf.len(), "reported size must match bytes written");
        buf
    }

    fn decode_against(bytes: &[u8], prev: &Frame) -> Decoded {
        Frame::decode(bytes, Some(prev), RleTimestamp::CopyPredecessor).unwrap()
    }

    // ── Full records ────────────────────────────────────────────

    #[test]
    fn full_record_layout() {
        let frame = Frame {
            grounded: true,
            gravity: false,
            ..base()
        };
        let buf = full_bytes(&frame);
        assert_eq!(buf.len(), FULL_FRAME_SIZE);
        // bits 0-10 plus grounded (bit 11)
        assert_eq!(&buf[..3], &[0x00, 0x0F, 0xFF]);
        assert_eq!(buf[3], 16);
        assert_eq!(&buf[4..6], &1000i16.to_be_bytes());
        assert_eq!(&buf[6..8], &(-2000i16).to_be_bytes());
        assert_eq!(&buf[8..10], &300i16.to_be_bytes());
        assert_eq!(&buf[10..12], &(-40i16).to_be_bytes());
        assert_eq!(&buf[12..14], &850i16.to_be_bytes());
        assert_eq!(&buf[14..16], &1100i16.to_be_bytes());
        assert_eq!(buf[16], (CompactKeys::FORWARD | CompactKeys::MOVELEFT).bits());
        assert_eq!(&buf[17..], &[25, 3, 80]);
    }

    #[test]
    fn full_record_roundtrip() {
        let frame = base();
        let buf = full_bytes(&frame);
        let got = Frame::decode(&buf, None, RleTimestamp::CopyPredecessor).unwrap();
        assert_eq!(got.frame, frame);
        assert_eq!(got.consumed, FULL_FRAME_SIZE);
        assert_eq!(got.kind, FrameKind::Full);
    }

    #[test]
    fn full_decode_ignores_marker_bits() {
        let mut buf = full_bytes(&Frame {
            grounded: false,
            gravity: true,
            ..base()
        });
        buf[1] &= !0x07;
        buf[2] = 0;
        let got = Frame::decode(&buf, None, RleTimestamp::CopyPredecessor).unwrap();
        assert!(!got.frame.grounded);
        assert!(got.frame.gravity);
        assert_eq!(got.frame.origin, base().origin);
    }

    // ── Run-length records ──────────────────────────────────────

    #[test]
    fn identical_successor_is_three_byte_rle() {
        let prev = base();
        let buf = delta_bytes(&prev, &prev);
        assert_eq!(buf, [0x00, 0x00, 0x01]);

        let got = decode_against(&buf, &prev);
        assert_eq!(got.consumed, FLAGS_SIZE);
        assert_eq!(got.kind, FrameKind::Rle);
        assert_eq!(got.frame, prev);
    }

    #[test]
    fn rle_ignores_status_and_counters() {
        let prev = base();
        let current = Frame {
            speed: prev.speed + 40,
            keys: Buttons::JUMP,
            fps: 30,
            grounded: true,
            gravity: false,
            ..prev
        };
        let buf = delta_bytes(&current, &prev);
        assert_eq!(buf.len(), FLAGS_SIZE);

        let got = decode_against(&buf, &prev);
        assert_eq!(got.frame.grounded, prev.grounded);
        assert_eq!(got.frame.gravity, prev.gravity);
        assert_eq!(got.frame.speed, prev.speed);
        assert_eq!(got.frame.keys, prev.keys);
    }

    #[test]
    fn rle_frame_interval_overrides_timestamp() {
        let prev = base();
        let buf = delta_bytes(&prev, &prev);
        let got = Frame::decode(&buf, Some(&prev), RleTimestamp::FrameInterval(17)).unwrap();
        assert_eq!(got.frame.timestamp, 17);
        assert_eq!(
            Frame {
                timestamp: prev.timestamp,
                ..got.frame
            },
            prev
        );
    }

    // ── Delta records ───────────────────────────────────────────

    #[test]
    fn large_origin_jump_uses_wide_delta() {
        let prev = base();
        let current = Frame {
            origin: [prev.origin[0] + 500, prev.origin[1], prev.origin[2]],
            ..prev
        };
        let flags = current.delta_flags(&prev);
        assert!(flags.contains(FrameFlags::ORIGIN_X_WIDE));
        assert!(!flags.contains(FrameFlags::ORIGIN_Y_WIDE));
        assert!(!flags.contains(FrameFlags::RLE));

        let buf = delta_bytes(&current, &prev);
        // flags + dts + x(2) + y + z + pitch + yaw + speed
        assert_eq!(buf.len(), 3 + 1 + 2 + 1 + 1 + 1 + 1 + 1);
        assert_eq!(&buf[4..6], &500i16.to_be_bytes());
        assert_eq!(decode_against(&buf, &prev).frame, current);
    }

    #[test]
    fn narrow_wide_threshold() {
        let prev = base();
        for (step, wide) in [(127i16, false), (128, true), (-127, false), (-128, true)] {
            let current = Frame {
                origin: [prev.origin[0], prev.origin[1] + step, prev.origin[2]],
                ..prev
            };
            let flags = current.delta_flags(&prev);
            assert_eq!(
                flags.contains(FrameFlags::ORIGIN_Y_WIDE),
                wide,
                "step {step} chose the wrong width"
            );
            let buf = delta_bytes(&current, &prev);
            assert_eq!(buf.len(), if wide { 11 } else { 10 });
            assert_eq!(decode_against(&buf, &prev).frame, current);
        }
    }

    #[test]
    fn yaw_wraps_across_the_seam() {
        let prev = Frame {
            angles: [0, 850],
            ..base()
        };
        let current = Frame {
            angles: [0, -850],
            ..prev
        };
        let flags = current.delta_flags(&prev);
        assert!(!flags.contains(FrameFlags::YAW_WIDE));

        let buf = delta_bytes(&current, &prev);
        // flags + dts + origin(3) + pitch, then the yaw byte
        assert_eq!(buf[8] as i8, 100);
        assert_eq!(decode_against(&buf, &prev).frame.angles, [0, -850]);
    }

    #[test]
    fn wide_angle_delta_also_folds() {
        let prev = Frame {
            angles: [0, 700],
            ..base()
        };
        let current = Frame {
            angles: [0, -500],
            ..prev
        };
        // raw -1200 folds to +600
        assert!(current.delta_flags(&prev).contains(FrameFlags::YAW_WIDE));
        let buf = delta_bytes(&current, &prev);
        assert_eq!(&buf[8..10], &600i16.to_be_bytes());
        assert_eq!(decode_against(&buf, &prev).frame.angles[1], -500);
    }

    #[test]
    fn bit_four_covers_pitch() {
        let prev = base();
        let current = Frame {
            angles: [160, 850],
            ..prev
        };
        let flags = current.delta_flags(&prev);
        assert!(flags.contains(FrameFlags::PITCH_WIDE));
        assert!(!flags.contains(FrameFlags::YAW_WIDE));
        assert_eq!(FrameFlags::PITCH_WIDE.bits(), 1 << 4);

        let buf = delta_bytes(&current, &prev);
        // flags, dts, three narrow origin deltas, then pitch first
        assert_eq!(&buf[7..9], &200i16.to_be_bytes());
        assert_eq!(buf[9], 0);
        assert_eq!(decode_against(&buf, &prev).frame.angles, [160, 850]);
    }

    #[test]
    fn changed_counters_are_presence_encoded() {
        let prev = base();
        let current = Frame {
            origin: [prev.origin[0] + 1, prev.origin[1], prev.origin[2]],
            keys: Buttons::BACK | Buttons::MOVERIGHT,
            sync: 91,
            ..prev
        };
        let flags = current.delta_flags(&prev);
        assert!(flags.contains(FrameFlags::KEYS_CHANGED | FrameFlags::SYNC_CHANGED));
        assert!(!flags.intersects(FrameFlags::FPS_CHANGED | FrameFlags::STRAFES_CHANGED));

        let buf = delta_bytes(&current, &prev);
        assert_eq!(buf.len(), 10 + 2);
        assert_eq!(
            buf[10],
            (CompactKeys::BACK | CompactKeys::MOVERIGHT).bits()
        );
        assert_eq!(buf[11], 91);
        assert_eq!(decode_against(&buf, &prev).frame, current);
    }

    #[test]
    fn status_bits_come_from_current_frame() {
        let prev = Frame {
            grounded: true,
            gravity: true,
            ..base()
        };
        let current = Frame {
            origin: [prev.origin[0], prev.origin[1], prev.origin[2] + 8],
            grounded: false,
            gravity: false,
            ..prev
        };
        let flags = current.delta_flags(&prev);
        assert!(!flags.intersects(FrameFlags::GROUNDED | FrameFlags::GRAVITY));
        let got = decode_against(&delta_bytes(&current, &prev), &prev);
        assert!(!got.frame.grounded);
        assert!(!got.frame.gravity);
    }

    #[test]
    fn timestamp_delta_is_signed_and_wraps() {
        let prev = Frame {
            timestamp: 200,
            ..base()
        };
        let current = Frame {
            timestamp: 10,
            origin: [prev.origin[0] - 3, prev.origin[1], prev.origin[2]],
            ..prev
        };
        let got = decode_against(&delta_bytes(&current, &prev), &prev);
        assert_eq!(got.frame.timestamp, 10);
    }

    #[test]
    fn unused_flag_bits_stay_zero() {
        let prev = base();
        let current = Frame {
            origin: [i16::MAX, i16::MIN, 0],
            angles: [900, -899],
            speed: -1,
            keys: Buttons::all(),
            fps: 0,
            strafes: 255,
            sync: 0,
            grounded: true,
            gravity: true,
            timestamp: 0,
        };
        assert_eq!(current.delta_flags(&prev).bits() & !0x1FFF, 0);
    }

    // ── Truncation ──────────────────────────────────────────────

    #[test]
    fn truncated_full_record_errors() {
        let buf = full_bytes(&base());
        for len in 0..FULL_FRAME_SIZE {
            let result = Frame::decode(&buf[..len], None, RleTimestamp::CopyPredecessor);
            assert!(
                matches!(result, Err(ReplayError::MalformedFrame { .. })),
                "prefix of {len} bytes should be malformed"
            );
        }
    }

    #[test]
    fn truncated_delta_record_errors() {
        let prev = base();
        let current = Frame {
            origin: [prev.origin[0] + 1000, prev.origin[1], prev.origin[2]],
            fps: 60,
            ..prev
        };
        let buf = delta_bytes(&current, &prev);
        for len in 0..buf.len() {
            let result = Frame::decode(&buf[..len], Some(&prev), RleTimestamp::CopyPredecessor);
            assert!(result.is_err(), "prefix of {len} bytes should fail");
        }
    }

    // ── Properties ──────────────────────────────────────────────

    // Keys carry all 16 bits so the properties also cover buttons dropped
    // by compaction. The shared fixture masks them, and its `Frame` is a
    // different type inside this crate's own unit tests anyway.
    fn arb_frame() -> impl Strategy<Value = Frame> {
        (
            any::<u8>(),
            any::<[i16; 3]>(),
            [-899i16..=899, -899i16..=899],
            any::<i16>(),
            any::<u16>(),
            any::<[u8; 3]>(),
            any::<[bool; 2]>(),
        )
            .prop_map(|(timestamp, origin, angles, speed, keys, [fps, strafes, sync], [grounded, gravity])| {
                Frame {
                    timestamp,
                    origin,
                    angles,
                    speed,
                    keys: Buttons::from_bits_retain(keys),
                    fps,
                    strafes,
                    sync,
                    grounded,
                    gravity,
                }
            })
    }

    proptest! {
        #[test]
        fn full_roundtrip_keeps_recorded_fields(frame in arb_frame()) {
            let buf = full_bytes(&frame);
            let got = Frame::decode(&buf, None, RleTimestamp::CopyPredecessor).unwrap();
            prop_assert_eq!(got.frame, frame.as_recorded());
        }

        #[test]
        fn delta_roundtrip_against_any_predecessor(prev in arb_frame(), current in arb_frame()) {
            let prev = prev.as_recorded();
            let buf = delta_bytes(&current, &prev);
            let got = decode_against(&buf, &prev);
            prop_assert_eq!(got.consumed, buf.len());
            if got.kind == FrameKind::Rle {
                prop_assert_eq!(got.frame, prev);
            } else {
                prop_assert_eq!(got.frame, current.as_recorded());
            }
        }
    }
}
