//! Strafe and sync statistics per jump.
//!
//! A jump runs from the tick the player leaves the ground to the tick they
//! land. While airborne, every tick on which the yaw changed counts as a
//! turning frame; it is "good" when horizontal speed grew since the last
//! turning frame. A strafe starts whenever the held keys switch sides.
//! Landing publishes a [`JumpStats`] and latches its strafe count and sync
//! for the frames that follow.

use strafe_replay::Buttons;

use crate::sample::TickSample;

/// Strafes beyond this count are still counted but get no per-strafe entry.
pub const MAX_TRACKED_STRAFES: usize = 32;

const LEFT_KEYS: Buttons = Buttons::FORWARD.union(Buttons::MOVELEFT);
const RIGHT_KEYS: Buttons = Buttons::BACK.union(Buttons::MOVERIGHT);

/// Statistics of one completed jump.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JumpStats {
    /// Side switches while turning in the air.
    pub strafes: u32,
    /// Percentage of turning frames that gained speed.
    pub sync: u32,
    /// Sync of each strafe, for the first [`MAX_TRACKED_STRAFES`].
    pub per_strafe_sync: Vec<u32>,
    /// Turning frames.
    pub frames: u32,
    /// Turning frames that gained speed.
    pub good_frames: u32,
    /// Net horizontal speed change over turning frames.
    pub gain: f32,
    /// Ticks with both strafe keys held.
    pub overlaps: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug, Default)]
struct Jump {
    strafes: u32,
    frames: u32,
    good_frames: u32,
    gain: f32,
    overlaps: u32,
    strafe_frames: [u32; MAX_TRACKED_STRAFES],
    strafe_good_frames: [u32; MAX_TRACKED_STRAFES],
    side: Option<Side>,
}

/// Accumulates [`JumpStats`] for one participant.
#[derive(Clone, Debug)]
pub struct StrafeTracker {
    jump: Jump,
    old_speed: f32,
    old_yaw: f32,
    was_on_ground: bool,
    strafes: u32,
    sync: u32,
}

impl Default for StrafeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StrafeTracker {
    /// A tracker for a participant standing on the ground.
    pub fn new() -> Self {
        Self {
            jump: Jump::default(),
            old_speed: 0.0,
            old_yaw: 0.0,
            was_on_ground: true,
            strafes: 0,
            sync: 0,
        }
    }

    /// Strafe count of the last landed jump.
    pub fn strafes(&self) -> u32 {
        self.strafes
    }

    /// Sync of the last landed jump.
    pub fn sync(&self) -> u32 {
        self.sync
    }

    /// Feed one tick. Returns the jump statistics on the tick that lands.
    pub fn update(&mut self, sample: &TickSample) -> Option<JumpStats> {
        if sample.buttons.is_overlapping() {
            self.jump.overlaps += 1;
        }
        if !sample.on_ground {
            self.turn(sample);
        }

        let landed = if self.was_on_ground && !sample.on_ground {
            self.jump = Jump::default();
            None
        } else if !self.was_on_ground && sample.on_ground {
            let stats = self.jump.finish();
            self.strafes = stats.strafes;
            self.sync = stats.sync;
            Some(stats)
        } else {
            None
        };

        self.was_on_ground = sample.on_ground;
        landed
    }

    fn turn(&mut self, sample: &TickSample) {
        let yaw = sample.angles[1];
        if yaw == self.old_yaw {
            return;
        }
        let speed = sample.horizontal_speed();
        let jump = &mut self.jump;
        jump.gain += speed - self.old_speed;

        let keys = sample.buttons;
        if jump.side != Some(Side::Left) && keys.intersects(LEFT_KEYS) && !keys.intersects(RIGHT_KEYS)
        {
            jump.side = Some(Side::Left);
            jump.strafes += 1;
        } else if jump.side != Some(Side::Right)
            && keys.intersects(RIGHT_KEYS)
            && !keys.intersects(LEFT_KEYS)
        {
            jump.side = Some(Side::Right);
            jump.strafes += 1;
        }

        let slot = jump.current_slot();
        if speed > self.old_speed {
            jump.good_frames += 1;
            if let Some(i) = slot {
                jump.strafe_good_frames[i] += 1;
            }
        }
        jump.frames += 1;
        if let Some(i) = slot {
            jump.strafe_frames[i] += 1;
        }

        self.old_speed = speed;
        self.old_yaw = yaw;
    }
}

impl Jump {
    fn current_slot(&self) -> Option<usize> {
        let i = (self.strafes as usize).checked_sub(1)?;
        (i < MAX_TRACKED_STRAFES).then_some(i)
    }

    fn finish(&self) -> JumpStats {
        let tracked = (self.strafes as usize).min(MAX_TRACKED_STRAFES);
        JumpStats {
            strafes: self.strafes,
            sync: percent(self.good_frames, self.frames),
            per_strafe_sync: (0..tracked)
                .map(|i| percent(self.strafe_good_frames[i], self.strafe_frames[i]))
                .collect(),
            frames: self.frames,
            good_frames: self.good_frames,
            gain: self.gain,
            overlaps: self.overlaps,
        }
    }
}

fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        0
    } else {
        (100 * u64::from(part) / u64::from(whole)) as u32
    }
}
