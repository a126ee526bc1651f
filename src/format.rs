//! es-AR style number rendering: `.` groups thousands, `,` separates decimals.

/// Marker shown for metrics that could not be fetched. Distinguishable from a
/// legitimate zero.
pub const UNAVAILABLE: &str = "N/A";

/// Formats a number with `.` as the thousands separator and `,` as the
/// decimal separator. The fractional part is rendered with `decimals` digits
/// and then stripped of trailing zeros, so `12345.6` at two decimals renders
/// as `"12.345,6"` and `1015.0` as `"1.015"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rendered.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}

/// Formats an optional number, rendering `None` as [`UNAVAILABLE`].
pub fn format_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), |v| format_number(v, decimals))
}

/// Formats a signed percentage, e.g. `+5,1%` / `-0,85%`.
pub fn format_pct(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{}%", format_number(value, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_uses_comma_decimals() {
        assert_eq!(format_number(12345.6, 2), "12.345,6");
        assert_eq!(format_number(1234567.89, 2), "1.234.567,89");
        assert_eq!(format_number(980.0, 2), "980");
        assert_eq!(format_number(1015.0, 0), "1.015");
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(format_number(1030.50, 2), "1.030,5");
        assert_eq!(format_number(41.5, 2), "41,5");
        assert_eq!(format_number(0.0, 2), "0");
    }

    #[test]
    fn negatives_keep_the_sign_before_the_grouping() {
        assert_eq!(format_number(-12345.6, 2), "-12.345,6");
        assert_eq!(format_number(-0.85, 2), "-0,85");
    }

    #[test]
    fn missing_value_renders_the_unavailable_marker() {
        assert_eq!(format_opt(None, 2), UNAVAILABLE);
        assert_eq!(format_opt(Some(12345.6), 2), "12.345,6");
    }

    #[test]
    fn percentages_carry_an_explicit_sign() {
        assert_eq!(format_pct(5.1), "+5,1%");
        assert_eq!(format_pct(-0.85), "-0,85%");
    }
}
