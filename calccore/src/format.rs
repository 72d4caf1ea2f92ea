//! Number formatting for the calculator display

/// Fractional digits kept when a result is shown.
pub const FRACTION_DIGITS: usize = 5;

/// Format a finite result for the display.
///
/// Fixed notation with at most [`FRACTION_DIGITS`] after the point and
/// trailing zeros trimmed. Negative zero, including anything that rounds
/// to it, shows as `"0"`.
pub fn format_result(n: f64) -> String {
    let fixed = format!("{:.*}", FRACTION_DIGITS, n);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Read a display string back as a number.
///
/// The engine only ever stores numerals here, so the fallback is never
/// hit in practice.
pub fn parse_display(s: &str) -> f64 {
    s.parse().unwrap_or(0.0)
}
