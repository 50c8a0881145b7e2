//! Snapping rules for proposed times.

use crate::models::viewport::TimeMs;

/// Minimum item length when no snap quantum is configured
pub const DEFAULT_MIN_LENGTH_MS: TimeMs = 1000;

const MS_PER_MINUTE: i64 = 60 * 1000;

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Snap a moved time to the nearest multiple of the quantum.
///
/// The local UTC offset (in minutes) modulo the quantum is subtracted from
/// the snapped value. Without a quantum the time is only rounded to the
/// millisecond. Non-finite times are not snapped; they saturate (or become
/// zero for NaN) on the cast to milliseconds.
pub fn snap_move(time: f64, snap: Option<TimeMs>, utc_offset_minutes: i32) -> TimeMs {
    match snap.filter(|q| *q > 0) {
        Some(quantum) if time.is_finite() => {
            let offset = i64::from(utc_offset_minutes) * MS_PER_MINUTE;
            let steps = round_half_up(time / quantum as f64) as TimeMs;
            steps.saturating_mul(quantum).saturating_sub(offset % quantum)
        }
        _ => round_half_up(time) as TimeMs,
    }
}

/// Snap a resized edge to the quantum grid anchored on the item's end time.
pub fn snap_resize(time: f64, snap: Option<TimeMs>, end_time: TimeMs) -> TimeMs {
    match snap.filter(|q| *q > 0) {
        Some(quantum) if time.is_finite() => {
            let remainder = end_time % quantum;
            let steps = round_half_up((time - remainder as f64) / quantum as f64) as TimeMs;
            steps.saturating_mul(quantum).saturating_add(remainder)
        }
        _ => round_half_up(time) as TimeMs,
    }
}

/// Smallest length an item may be resized to
pub fn min_length(snap: Option<TimeMs>) -> TimeMs {
    snap.filter(|q| *q > 0).unwrap_or(DEFAULT_MIN_LENGTH_MS)
}

/// Snap a raw resize delta and clamp it so the item keeps at least the
/// minimum length.
///
/// For the left edge a positive delta shrinks the item, for the right edge
/// a negative one does. A clamped delta leaves exactly the minimum length.
pub fn resize_time_delta(
    length: TimeMs,
    raw_delta: f64,
    shrinks_from_left: bool,
    snap: Option<TimeMs>,
) -> TimeMs {
    let delta = snap_move(raw_delta, snap, 0);
    let floor = min_length(snap);
    let resulting = if shrinks_from_left {
        length.saturating_sub(delta)
    } else {
        length.saturating_add(delta)
    };

    if resulting < floor {
        if shrinks_from_left {
            length - floor
        } else {
            floor - length
        }
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(2.5, 3.0 ; "positive half rounds up")]
    #[test_case(-2.5, -2.0 ; "negative half rounds up")]
    #[test_case(1.49, 1.0 ; "below half")]
    #[test_case(-1.6, -2.0 ; "negative above half")]
    fn test_round_half_up(input: f64, expected: f64) {
        assert_eq!(round_half_up(input), expected);
    }

    #[test_case(1833.0, Some(1000), 0, 2000 ; "rounds up to quantum")]
    #[test_case(1499.0, Some(1000), 0, 1000 ; "rounds down to quantum")]
    #[test_case(1833.4, None, 0, 1833 ; "no quantum keeps time")]
    #[test_case(0.0, Some(900_000), 60, 0 ; "offset multiple of quantum")]
    #[test_case(3_600_000.0, Some(7_200_000), 60, 3_600_000 ; "one hour offset on two hour grid")]
    #[test_case(7_200_000.0, Some(7_200_000), -60, 10_800_000 ; "negative offset keeps sign")]
    fn test_snap_move(time: f64, snap: Option<i64>, offset: i32, expected: i64) {
        assert_eq!(snap_move(time, snap, offset), expected);
    }

    #[test]
    fn test_halves_round_up_without_quantum() {
        assert_eq!(snap_move(-2.5, None, 0), -2);
        assert_eq!(snap_move(2.5, None, 0), 3);
        assert_eq!(snap_resize(-1500.5, None, 0), -1500);
    }

    #[test]
    fn test_non_finite_times_pass_through() {
        assert_eq!(snap_move(f64::INFINITY, Some(1000), 60), i64::MAX);
        assert_eq!(snap_move(f64::NEG_INFINITY, Some(1000), 0), i64::MIN);
        assert_eq!(snap_move(f64::NAN, Some(1000), 0), 0);
        assert_eq!(snap_resize(f64::INFINITY, Some(1000), 5300), i64::MAX);
        assert_eq!(snap_resize(f64::NAN, Some(1000), 5300), 0);
    }

    #[test]
    fn test_huge_times_saturate_on_the_grid() {
        assert_eq!(snap_move(1e30, Some(1000), 60), i64::MAX);
        assert_eq!(snap_resize(-1e30, Some(1000), 5300), i64::MIN + 300);
    }

    #[test]
    fn test_snap_move_ignores_non_positive_quantum() {
        assert_eq!(snap_move(1234.0, Some(0), 0), 1234);
        assert_eq!(snap_move(1234.0, Some(-5), 0), 1234);
    }

    #[test]
    fn test_snap_resize_anchors_on_end_time() {
        // End time 5300 sits 300 past the 1000 grid, so the grid shifts by 300
        assert_eq!(snap_resize(5300.0, Some(1000), 5300), 5300);
        assert_eq!(snap_resize(6700.0, Some(1000), 5300), 6300);
        assert_eq!(snap_resize(6900.0, Some(1000), 5300), 7300);
        assert_eq!(snap_resize(6900.4, None, 5300), 6900);
    }

    #[test]
    fn test_min_length() {
        assert_eq!(min_length(None), 1000);
        assert_eq!(min_length(Some(900_000)), 900_000);
    }

    #[test]
    fn test_resize_time_delta_passes_through_when_long_enough() {
        assert_eq!(resize_time_delta(4000, 1800.0, false, Some(1000)), 2000);
        assert_eq!(resize_time_delta(4000, -1800.0, false, Some(1000)), -2000);
        assert_eq!(resize_time_delta(4000, 2200.0, true, Some(1000)), 2000);
    }

    #[test]
    fn test_resize_time_delta_clamps_to_floor() {
        // Right edge pulled far left: length clamps to one quantum
        assert_eq!(resize_time_delta(4000, -9000.0, false, Some(1000)), -3000);
        // Left edge pushed past the end: same floor from the other side
        assert_eq!(resize_time_delta(4000, 9000.0, true, Some(1000)), 3000);
        // Without snapping the floor is one second
        assert_eq!(resize_time_delta(4000, -3500.0, false, None), -3000);
    }

    #[test]
    fn test_resize_time_delta_with_infinite_delta() {
        assert_eq!(resize_time_delta(2000, f64::INFINITY, false, Some(1000)), i64::MAX);
        assert_eq!(resize_time_delta(2000, f64::INFINITY, true, Some(1000)), 1000);
        assert_eq!(resize_time_delta(2000, f64::NAN, false, Some(1000)), 0);
    }
}
