//! Tick thinning and tick-rate measurement.
//!
//! Both counters work in whole milliseconds of game time, as reported by
//! each tick's frame time.

/// Captures at most one tick per sample interval.
///
/// While the accumulated time is below the interval, each tick only adds
/// its own frame time. The first tick that finds the interval reached is
/// captured with the accumulated time as its timestamp, and the
/// accumulator starts over from zero.
#[derive(Clone, Debug)]
pub struct SampleGate {
    interval_ms: u32,
    accumulated_ms: u32,
}

impl SampleGate {
    /// A gate that opens every `interval_ms` milliseconds.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            accumulated_ms: 0,
        }
    }

    /// Feed one tick. Returns the frame timestamp when the tick is captured.
    ///
    /// Timestamps above 255 ms saturate.
    pub fn tick(&mut self, frame_time_ms: u32) -> Option<u8> {
        if self.accumulated_ms < self.interval_ms {
            self.accumulated_ms = self.accumulated_ms.saturating_add(frame_time_ms);
            return None;
        }
        let timestamp = self.accumulated_ms.min(u32::from(u8::MAX)) as u8;
        self.accumulated_ms = 0;
        Some(timestamp)
    }

    /// Forget any accumulated time.
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }
}

/// Counts ticks per window of game time.
#[derive(Clone, Debug)]
pub struct FpsCounter {
    window_ms: u32,
    elapsed_ms: u32,
    count: u32,
    fps: u32,
}

impl FpsCounter {
    /// A counter publishing once per `window_ms` milliseconds.
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            elapsed_ms: 0,
            count: 0,
            fps: 0,
        }
    }

    /// Count one tick and return the current reading.
    ///
    /// The reading changes only when a full window has elapsed; until the
    /// first window closes it is 0.
    pub fn tick(&mut self, frame_time_ms: u32) -> u32 {
        self.count += 1;
        if self.elapsed_ms >= self.window_ms {
            self.fps = self.count;
            self.count = 0;
            self.elapsed_ms = 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(frame_time_ms);
        self.fps
    }

    /// The last published reading.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
