//! Capture configuration, validation, and error types.
//!
//! [`CaptureConfig`] is the input for constructing a
//! [`Recorder`](crate::Recorder). [`validate()`](CaptureConfig::validate)
//! checks it once at construction.

use strafe_replay::FORMAT_VERSION;
use thiserror::Error;

/// Highest sample rate the millisecond gate can express.
pub const MAX_SAMPLE_RATE_HZ: u32 = 1000;

// ── CaptureConfig ──────────────────────────────────────────────────

/// Sampling and header settings for a recorder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Frames captured per second of game time. Default: 60.
    pub sample_rate_hz: u32,
    /// Window over which ticks are counted for the fps reading. Default: 1000 ms.
    pub fps_window_ms: u32,
    /// Divisor applied to the fps reading before it is stored. Default: 4.
    pub fps_divisor: u32,
    /// Version written into replay headers. Default: 100.
    pub format_version: u16,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 60,
            fps_window_ms: 1000,
            fps_divisor: 4,
            format_version: FORMAT_VERSION,
        }
    }
}

impl CaptureConfig {
    /// Milliseconds of game time between captured frames.
    pub fn sample_interval_ms(&self) -> u32 {
        1000 / self.sample_rate_hz.max(1)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate_hz == 0 || self.sample_rate_hz > MAX_SAMPLE_RATE_HZ {
            return Err(ConfigError::InvalidSampleRate {
                value: self.sample_rate_hz,
            });
        }
        if self.fps_window_ms == 0 {
            return Err(ConfigError::ZeroFpsWindow);
        }
        if self.fps_divisor == 0 {
            return Err(ConfigError::ZeroFpsDivisor);
        }
        Ok(())
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`CaptureConfig::validate`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Sample rate is zero or above [`MAX_SAMPLE_RATE_HZ`].
    #[error("sample_rate_hz must be in 1..={}, got {value}", MAX_SAMPLE_RATE_HZ)]
    InvalidSampleRate {
        /// The rejected value.
        value: u32,
    },
    /// The fps window is zero milliseconds.
    #[error("fps_window_ms must be at least 1")]
    ZeroFpsWindow,
    /// The fps divisor is zero.
    #[error("fps_divisor must be at least 1")]
    ZeroFpsDivisor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = CaptureConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.sample_interval_ms(), 16);
        assert_eq!(cfg.format_version, 100);
    }

    #[test]
    fn sample_rate_bounds() {
        for bad in [0, 1001, u32::MAX] {
            let cfg = CaptureConfig {
                sample_rate_hz: bad,
                ..CaptureConfig::default()
            };
            assert_eq!(
                cfg.validate(),
                Err(ConfigError::InvalidSampleRate { value: bad })
            );
        }
        let cfg = CaptureConfig {
            sample_rate_hz: 1000,
            ..CaptureConfig::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.sample_interval_ms(), 1);
    }

    #[test]
    fn zero_fps_settings_rejected() {
        let cfg = CaptureConfig {
            fps_window_ms: 0,
            ..CaptureConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroFpsWindow));
        let cfg = CaptureConfig {
            fps_divisor: 0,
            ..CaptureConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroFpsDivisor));
    }
}
