//! Codec configuration.
//!
//! [`CodecConfig`] controls the two behaviours the wire format leaves open:
//! what an encode of a frameless replay produces, and which timestamp a
//! decoded run-length frame carries. The defaults reproduce files that
//! existing readers expect byte for byte.

use crate::error::ReplayError;

/// What [`Replay::encode`](crate::Replay::encode) does when there are no frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyReplayPolicy {
    /// Write the header alone and log a warning.
    #[default]
    HeaderOnly,
    /// Refuse with [`ReplayError::EmptyReplay`] before writing anything.
    Reject,
}

/// Timestamp carried by a frame decoded from a run-length record.
///
/// Run-length records hold no payload, so the elapsed time of the frame
/// they stand for is not on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RleTimestamp {
    /// The frame is an exact copy of its predecessor, timestamp included.
    #[default]
    CopyPredecessor,
    /// The frame copies its predecessor but carries this many milliseconds.
    FrameInterval(u8),
}

/// Codec behaviour switches.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// Behaviour when encoding a replay with no frames.
    pub empty_replay: EmptyReplayPolicy,
    /// Timestamp assigned to run-length frames on decode.
    pub rle_timestamp: RleTimestamp,
}

impl CodecConfig {
    /// Config for new recordings whose consumers want real frame timing.
    ///
    /// Run-length frames decode with `interval_ms` as their timestamp
    /// instead of inheriting the predecessor's.
    pub fn with_frame_interval(interval_ms: u8) -> Self {
        Self {
            rle_timestamp: RleTimestamp::FrameInterval(interval_ms),
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ReplayError> {
        if self.rle_timestamp == RleTimestamp::FrameInterval(0) {
            return Err(ReplayError::InvalidConfig {
                reason: "run-length frame interval must be at least 1 ms".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_compatible() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg.empty_replay, EmptyReplayPolicy::HeaderOnly);
        assert_eq!(cfg.rle_timestamp, RleTimestamp::CopyPredecessor);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_interval_rejected() {
        let cfg = CodecConfig::with_frame_interval(0);
        assert!(matches!(
            cfg.validate(),
            Err(ReplayError::InvalidConfig { .. })
        ));
        assert!(CodecConfig::with_frame_interval(16).validate().is_ok());
    }
}
