//! Benchmark profiles for the strafe replay codec.
//!
//! Provides deterministic trajectories shaped like real recordings:
//!
//! - [`reference_run`]: a strafe-jumping run with occasional standing pauses
//! - [`stress_run`]: large jumps between frames so most fields go wide
//! - [`reference_header`]: a fully populated header

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use strafe_replay::{Buttons, Frame, Header};

/// A populated header for benchmark replays.
pub fn reference_header() -> Header {
    Header {
        timestamp: 1_700_000_000,
        map: "bhop_bench".into(),
        time: 90_000,
        name: "bench".into(),
        identity: "STEAM_0:0:1".into(),
        info: "normal".into(),
        ..Header::default()
    }
}

/// Build a reference run of `len` frames sampled at 60 Hz.
///
/// Mostly narrow deltas, one standing pause of eight run-length frames
/// every 64 frames, and the yaw sweeping across the ±180° seam.
pub fn reference_run(len: usize, seed: u64) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(len);
    let mut rng = Lcg::new(seed);
    let mut prev = Frame {
        timestamp: 16,
        origin: [0, 0, 64],
        speed: 1000,
        keys: Buttons::FORWARD,
        fps: 25,
        grounded: true,
        gravity: true,
        ..Frame::default()
    };
    let mut yaw: i32 = 0;

    for i in 0..len {
        if i % 64 >= 56 {
            frames.push(prev);
            continue;
        }
        let left = (i / 8) % 2 == 0;
        yaw += 3 + (rng.next() % 6) as i32;
        if yaw > 900 {
            yaw -= 1800;
        }
        let frame = Frame {
            timestamp: 16 + (i % 2) as u8,
            origin: [
                prev.origin[0].wrapping_add(10 + (rng.next() % 8) as i16),
                prev.origin[1].wrapping_sub((rng.next() % 8) as i16),
                64 + ((i % 40) as i16 - 20).abs() * 3,
            ],
            angles: [(rng.next() % 60) as i16 - 30, yaw as i16],
            speed: prev.speed.saturating_add(2),
            keys: if left {
                Buttons::FORWARD | Buttons::MOVELEFT
            } else {
                Buttons::FORWARD | Buttons::MOVERIGHT
            },
            strafes: (i / 8) as u8,
            sync: 60 + (i % 40) as u8,
            grounded: i % 40 == 0,
            ..prev
        };
        frames.push(frame);
        prev = frame;
    }
    frames
}

/// Build a stress run of `len` frames where every origin and angle delta
/// exceeds the narrow range.
pub fn stress_run(len: usize, seed: u64) -> Vec<Frame> {
    let mut rng = Lcg::new(seed);
    (0..len)
        .map(|i| {
            let sign = if i % 2 == 0 { 1 } else { -1 };
            Frame {
                timestamp: (rng.next() % 40) as u8,
                origin: [
                    sign * (1000 + (rng.next() % 5000) as i16),
                    -sign * (1000 + (rng.next() % 5000) as i16),
                    sign * (500 + (rng.next() % 1000) as i16),
                ],
                angles: [sign * 400, -sign * 600],
                speed: (rng.next() % 3000) as i16,
                keys: Buttons::JUMP | Buttons::DUCK,
                fps: (rng.next() % 60) as u8,
                strafes: (rng.next() % 32) as u8,
                sync: (rng.next() % 101) as u8,
                grounded: i % 3 == 0,
                gravity: i % 5 != 0,
            }
        })
        .collect()
}

/// Minimal deterministic generator so profiles are reproducible per seed.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strafe_replay::{CodecConfig, Replay};

    #[test]
    fn reference_run_roundtrips() {
        let replay = Replay::with_frames(reference_header(), reference_run(500, 42));
        let cfg = CodecConfig::default();
        let bytes = replay.to_bytes(&cfg).unwrap();
        assert_eq!(Replay::decode(&bytes, &cfg).unwrap(), replay);
    }

    #[test]
    fn stress_run_roundtrips() {
        let replay = Replay::with_frames(reference_header(), stress_run(200, 7));
        let cfg = CodecConfig::default();
        let bytes = replay.to_bytes(&cfg).unwrap();
        assert_eq!(Replay::decode(&bytes, &cfg).unwrap(), replay);
    }

    #[test]
    fn profiles_are_deterministic() {
        assert_eq!(reference_run(100, 3), reference_run(100, 3));
        assert_ne!(stress_run(10, 1), stress_run(10, 2));
    }
}
