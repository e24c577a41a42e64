//! Display formatting for the read-only stream properties.

/// Shown in place of a duration that could not be determined.
pub const UNKNOWN_DURATION: &str = "--:--:--";

/// Render a duration in seconds as `MM:SS`, or `HH:MM:SS` from one hour up.
///
/// The fractional part of the input is dropped. A zero hour component is
/// omitted and every remaining component is zero-padded to two digits.
/// Unknown, negative, or non-finite input yields [`UNKNOWN_DURATION`].
pub fn duration_display(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return UNKNOWN_DURATION.to_string();
    };

    let total = seconds.trunc() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours == 0 {
        format!("{:02}:{:02}", minutes, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

/// Render a bitrate as `"<n> kbps"`; unknown renders as `"0 kbps"`.
pub fn bitrate_display(kbps: Option<u32>) -> String {
    format!("{} kbps", kbps.unwrap_or(0))
}
