//! Run time strings.

use crate::error::TimeFormatError;

/// Parse a run time written as `M:SS.mmms` into milliseconds.
///
/// ```
/// assert_eq!(strafe_capture::parse_run_time("1:05.250s"), Ok(65_250));
/// ```
pub fn parse_run_time(input: &str) -> Result<u32, TimeFormatError> {
    let body = input
        .strip_suffix('s')
        .ok_or_else(|| TimeFormatError::MissingSuffix {
            input: input.to_owned(),
        })?;

    let separators = || TimeFormatError::MissingSeparators {
        input: input.to_owned(),
    };
    let (minutes, rest) = body.split_once(':').ok_or_else(separators)?;
    let (seconds, millis) = rest.split_once('.').ok_or_else(separators)?;

    let minutes = component(minutes)?;
    let seconds = component(seconds)?;
    let millis = component(millis)?;

    minutes
        .checked_mul(60_000)
        .and_then(|m| m.checked_add(seconds.checked_mul(1000)?))
        .and_then(|t| t.checked_add(millis))
        .ok_or_else(|| TimeFormatError::Overflow {
            input: input.to_owned(),
        })
}

fn component(part: &str) -> Result<u32, TimeFormatError> {
    let invalid = || TimeFormatError::InvalidNumber {
        part: part.to_owned(),
    };
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    part.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_seconds_millis() {
        assert_eq!(parse_run_time("0:00.000s"), Ok(0));
        assert_eq!(parse_run_time("2:03.456s"), Ok(123_456));
        assert_eq!(parse_run_time("12:00.5s"), Ok(720_005));
    }

    #[test]
    fn requires_trailing_s() {
        assert!(matches!(
            parse_run_time("1:00.000"),
            Err(TimeFormatError::MissingSuffix { .. })
        ));
        assert!(matches!(
            parse_run_time(""),
            Err(TimeFormatError::MissingSuffix { .. })
        ));
    }

    #[test]
    fn requires_colon_before_dot() {
        for bad in ["100.000s", "1:00s", "1.00:000s"] {
            assert!(
                matches!(parse_run_time(bad), Err(TimeFormatError::MissingSeparators { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_parts() {
        assert_eq!(
            parse_run_time("a:00.000s"),
            Err(TimeFormatError::InvalidNumber { part: "a".into() })
        );
        assert!(parse_run_time("1:-5.000s").is_err());
        assert!(parse_run_time("1:.000s").is_err());
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            parse_run_time("99999999:00.000s"),
            Err(TimeFormatError::Overflow { .. })
        ));
    }
}
