//! Per-tick game state and its conversion to replay frames.

use strafe_replay::angle;
use strafe_replay::{Buttons, Frame, ANGLE_SCALE, ORIGIN_SCALE};

/// Game state reported for one player on one movement tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickSample {
    /// Duration of this tick in seconds.
    pub frame_time: f32,
    /// World position.
    pub origin: [f32; 3],
    /// View angles in degrees: pitch, yaw, roll.
    pub angles: [f32; 3],
    /// Velocity in units per second.
    pub velocity: [f32; 3],
    /// Buttons held during the tick.
    pub buttons: Buttons,
    /// Standing on something.
    pub on_ground: bool,
    /// Gravity multiplier; 1.0 is normal gravity.
    pub gravity: f32,
    /// The player is dead; the tick is not recorded.
    pub dead: bool,
}

impl TickSample {
    /// Frame time in whole milliseconds, truncated.
    pub fn frame_time_ms(&self) -> u32 {
        (self.frame_time * 1000.0) as u32
    }

    /// Horizontal speed in units per second.
    pub fn horizontal_speed(&self) -> f32 {
        let [x, y, _] = self.velocity;
        (x * x + y * y).sqrt()
    }
}

/// Counters a recorder attaches to each captured frame.
///
/// Values wider than one byte are truncated to the wire width
/// (256 becomes 0, 300 becomes 44).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Stored fps reading (already divided).
    pub fps: u32,
    /// Strafes of the last completed jump.
    pub strafes: u32,
    /// Sync percentage of the last completed jump.
    pub sync: u32,
}

/// Convert one captured tick into a fixed-point frame.
///
/// Positions are scaled by [`ORIGIN_SCALE`] and pitch/yaw by
/// [`ANGLE_SCALE`]; float to integer conversions saturate. Yaw reported in
/// 0..360° is folded into the signed angle domain.
pub fn quantize(sample: &TickSample, timestamp: u8, stats: CaptureStats) -> Frame {
    let origin = sample.origin.map(|v| (v * ORIGIN_SCALE) as i16);
    let angles = [sample.angles[0], sample.angles[1]]
        .map(|v| angle::fold((v * ANGLE_SCALE) as i32) as i16);
    Frame {
        timestamp,
        origin,
        angles,
        speed: sample.horizontal_speed() as i16,
        keys: sample.buttons,
        fps: stats.fps as u8,
        strafes: stats.strafes as u8,
        sync: stats.sync as u8,
        grounded: sample.on_ground,
        gravity: sample.gravity == 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TickSample {
        TickSample {
            frame_time: 0.004,
            origin: [100.25, -50.5, 36.0],
            angles: [10.0, -170.0, 0.0],
            velocity: [300.0, 400.0, -20.0],
            buttons: Buttons::FORWARD | Buttons::ATTACK,
            on_ground: true,
            gravity: 1.0,
            dead: false,
        }
    }

    #[test]
    fn scales_and_truncates_toward_zero() {
        let frame = quantize(&sample(), 16, CaptureStats::default());
        assert_eq!(frame.timestamp, 16);
        assert_eq!(frame.origin, [401, -202, 144]);
        assert_eq!(frame.angles, [50, -850]);
        assert_eq!(frame.speed, 500);
        assert!(frame.grounded);
        assert!(frame.gravity);
    }

    #[test]
    fn keeps_all_buttons_until_encode() {
        let frame = quantize(&sample(), 16, CaptureStats::default());
        assert_eq!(frame.keys, Buttons::FORWARD | Buttons::ATTACK);
    }

    #[test]
    fn counters_truncate_to_one_byte() {
        let stats = CaptureStats {
            fps: 256,
            strafes: 300,
            sync: 100,
        };
        let frame = quantize(&sample(), 16, stats);
        assert_eq!(frame.fps, 0);
        assert_eq!(frame.strafes, 44);
        assert_eq!(frame.sync, 100);
    }

    #[test]
    fn out_of_range_positions_saturate() {
        let far = TickSample {
            origin: [10_000.0, -10_000.0, 0.0],
            ..sample()
        };
        let frame = quantize(&far, 16, CaptureStats::default());
        assert_eq!(frame.origin, [i16::MAX, i16::MIN, 0]);
    }

    #[test]
    fn unsigned_yaw_folds_into_domain() {
        let turned = TickSample {
            angles: [0.0, 190.0, 0.0],
            ..sample()
        };
        assert_eq!(quantize(&turned, 16, CaptureStats::default()).angles[1], -850);
    }

    #[test]
    fn low_gravity_clears_flag() {
        let floaty = TickSample {
            gravity: 0.5,
            on_ground: false,
            ..sample()
        };
        let frame = quantize(&floaty, 16, CaptureStats::default());
        assert!(!frame.gravity);
        assert!(!frame.grounded);
    }

    #[test]
    fn frame_time_truncates_to_millis() {
        assert_eq!(sample().frame_time_ms(), 4);
        let t = TickSample {
            frame_time: 0.0169,
            ..sample()
        };
        assert_eq!(t.frame_time_ms(), 16);
    }
}
