//! Wraparound arithmetic for fixed-point view angles.
//!
//! Angles are stored at 0.2° resolution, so a full turn spans
//! [`ANGLE_RANGE`] units and ±180° sits at ±[`ANGLE_HALF_RANGE`].
//! Every difference and every reconstruction is folded exactly once.

/// Units in a full turn (360° at 0.2° per unit).
pub const ANGLE_RANGE: i32 = 1800;

/// Units in half a turn (180°).
pub const ANGLE_HALF_RANGE: i32 = 900;

/// Fold a raw angle value back into the cyclic domain.
///
/// Values above 900 lose one turn, values below -900 gain one. The fold
/// is applied once; inputs are expected within one turn of the domain.
pub fn fold(raw: i32) -> i32 {
    if raw > ANGLE_HALF_RANGE {
        raw - ANGLE_RANGE
    } else if raw < -ANGLE_HALF_RANGE {
        raw + ANGLE_RANGE
    } else {
        raw
    }
}

/// Shortest signed turn from `prev` to `current`.
pub fn delta(current: i16, prev: i16) -> i32 {
    fold(i32::from(current) - i32::from(prev))
}

/// Reconstruct an angle from its predecessor and a decoded delta.
///
/// +900 and -900 name the same heading; a reconstruction may land on
/// either one.
pub fn apply(prev: i16, delta: i32) -> i16 {
    fold(i32::from(prev) + delta) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn crossing_the_seam_takes_the_short_way() {
        assert_eq!(delta(-850, 850), 100);
        assert_eq!(apply(850, 100), -850);
        assert_eq!(delta(850, -850), -100);
        assert_eq!(apply(-850, -100), 850);
    }

    #[test]
    fn fold_boundaries() {
        assert_eq!(fold(900), 900);
        assert_eq!(fold(901), -899);
        assert_eq!(fold(-900), -900);
        assert_eq!(fold(-901), 899);
        assert_eq!(fold(0), 0);
    }

    #[test]
    fn small_turns_are_unchanged() {
        assert_eq!(delta(15, 10), 5);
        assert_eq!(delta(-10, 10), -20);
    }

    proptest! {
        #[test]
        fn delta_then_apply_reconstructs(
            prev in -899i16..=899,
            current in -899i16..=899,
        ) {
            let d = delta(current, prev);
            prop_assert!((-ANGLE_HALF_RANGE..=ANGLE_HALF_RANGE).contains(&d));
            prop_assert_eq!(apply(prev, d), current);
        }
    }
}
