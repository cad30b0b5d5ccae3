/// Utility helpers for the portfolio page

/// Shown when a time is not known yet.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// Format seconds as `M:SS`.
///
/// Fractions are floored, minutes are unbounded and anything that is not a
/// finite number renders as [`TIME_PLACEHOLDER`].
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return TIME_PLACEHOLDER.to_string();
    }
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// [`format_time`] for values that may not be resolved yet.
pub fn format_optional_time(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| TIME_PLACEHOLDER.to_string(), format_time)
}

/// Create a simple slug from a string suitable for element ids.
/// Lowercases the string, converts groups of non-alphanumeric chars to single hyphens,
/// and trims leading/trailing hyphens.
pub fn slugify<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref().to_lowercase();
    let mut out = String::with_capacity(s.len());
    let mut prev_dash = false;

    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            prev_dash = false;
        } else if !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }

    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_renders_placeholder() {
        assert_eq!(format_time(f64::NAN), "--:--");
        assert_eq!(format_time(f64::INFINITY), "--:--");
        assert_eq!(format_optional_time(None), "--:--");
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(75.0), "1:15");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_optional_time(Some(125.4)), "2:05");
    }

    #[test]
    fn negative_input_clamps_to_zero() {
        assert_eq!(format_time(-4.0), "0:00");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Midnight Ride"), "midnight-ride");
        assert_eq!(slugify("  Neon -- Dreams! "), "neon-dreams");
    }
}
