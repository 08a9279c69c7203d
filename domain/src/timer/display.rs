//! Clock formatting for timer display

use super::entities::TimerState;

/// Format remaining time as `{sign}{minutes}:{seconds}`.
///
/// Sign is `-` for overtime; seconds are zero-padded to two digits.
pub fn format_clock(timer: &TimerState) -> String {
    let sign = if timer.remaining < 0 { "-" } else { "" };
    let magnitude = timer.remaining.abs();
    format!("{}{}:{:02}", sign, magnitude / 60, magnitude % 60)
}

/// Fraction of the clock still remaining, as a percentage.
///
/// `remaining / (remaining + elapsed) * 100`; 0 when both are zero so the
/// progress display never sees NaN.
pub fn progress_percent(timer: &TimerState) -> f64 {
    let denominator = timer.remaining + i64::from(timer.elapsed);
    if denominator == 0 {
        return 0.0;
    }
    timer.remaining as f64 / denominator as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(elapsed: u32, remaining: i64) -> TimerState {
        TimerState {
            elapsed,
            remaining,
            ticking: false,
        }
    }

    #[test]
    fn test_format_basic() {
        assert_eq!(format_clock(&timer(0, 600)), "10:00");
        assert_eq!(format_clock(&timer(0, 61)), "1:01");
        assert_eq!(format_clock(&timer(0, 9)), "0:09");
        assert_eq!(format_clock(&timer(0, 0)), "0:00");
    }

    #[test]
    fn test_format_overtime() {
        assert_eq!(format_clock(&timer(70, -10)), "-0:10");
        assert_eq!(format_clock(&timer(200, -75)), "-1:15");
    }

    #[test]
    fn test_percent_full_and_partial() {
        assert_eq!(progress_percent(&timer(0, 60)), 100.0);
        assert_eq!(progress_percent(&timer(30, 30)), 50.0);
        assert_eq!(progress_percent(&timer(45, 15)), 25.0);
    }

    #[test]
    fn test_percent_zero_denominator() {
        // Both zero would divide 0 by 0; callers must see 0%
        assert_eq!(progress_percent(&timer(0, 0)), 0.0);
    }
}
