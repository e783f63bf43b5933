//! Human-readable durations for log output.

use std::time::Duration;

/// Format a sync interval as `500 ms`, `42 s`, `5 min` or `5 min 30 s`.
///
/// Sub-second intervals are shown exactly; longer ones are rounded to the
/// nearest second.
///
/// # Examples
///
/// ```
/// use annalist::format_interval;
/// use std::time::Duration;
///
/// assert_eq!(format_interval(Duration::from_millis(90_000)), "1 min 30 s");
/// ```
pub fn format_interval(interval: Duration) -> String {
    let millis = interval.as_millis();
    if millis < 1000 {
        return format!("{} ms", millis);
    }

    let total_seconds = (millis + 500) / 1000;
    if total_seconds < 60 {
        return format!("{} s", total_seconds);
    }

    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    if seconds == 0 {
        format!("{} min", minutes)
    } else {
        format!("{} min {} s", minutes, seconds)
    }
}
