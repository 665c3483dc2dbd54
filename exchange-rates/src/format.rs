//! Brazilian Portuguese number formatting, parsing and live-input cleanup.
//!
//! Amounts are shown as `1.234,56`: `.` groups thousands, `,` separates
//! decimals.

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';
const MAX_TYPED_DECIMALS: usize = 2;

/// Formats `value` with a fixed number of decimals using pt-BR separators.
///
/// Non-finite values format as zero.
pub fn format_amount(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::with_capacity(fixed.len() + whole.len() / 3 + 1);
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(digit);
    }
    if !fraction.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(fraction);
    }
    out
}

/// Parses a pt-BR formatted number. Empty or unparsable input yields `0.0`.
///
/// Thousands separators are dropped, the first `,` becomes the decimal point
/// and the longest numeric prefix is read, so trailing garbage is ignored.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned = text
        .trim()
        .replace(THOUSANDS_SEPARATOR, "")
        .replacen(DECIMAL_SEPARATOR, ".", 1);
    leading_number(&cleaned).unwrap_or(0.0)
}

/// Cleans a value as it is being typed into an amount field.
///
/// Keeps digits, `.` and `,`; turns the first `.` into `,`; folds any extra
/// commas into the fractional part and truncates it to two digits.
pub fn sanitize_live_input(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == THOUSANDS_SEPARATOR || *c == DECIMAL_SEPARATOR)
        .collect();
    let kept = kept.replacen(THOUSANDS_SEPARATOR, ",", 1);

    let mut parts = kept.split(DECIMAL_SEPARATOR);
    let whole = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return whole.to_string();
    }

    let fraction: String = rest.concat().chars().take(MAX_TYPED_DECIMALS).collect();
    format!("{whole}{DECIMAL_SEPARATOR}{fraction}")
}

/// Reads the longest prefix of `s` that forms a decimal float.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_start = end;
    end = digits_from(end);
    let mut mantissa = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_amount(1234567.891, 2), "1.234.567,89");
        assert_eq!(format_amount(999.0, 2), "999,00");
        assert_eq!(format_amount(1000.0, 2), "1.000,00");
        assert_eq!(format_amount(0.0, 2), "0,00");
    }

    #[test]
    fn test_format_rate_precision() {
        assert_eq!(format_amount(5.42, 4), "5,4200");
        assert_eq!(format_amount(0.18450184, 4), "0,1845");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_amount(-1234.5, 2), "-1.234,50");
        assert_eq!(format_amount(-0.001, 2), "0,00");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_amount(f64::NAN, 2), "0,00");
        assert_eq!(format_amount(f64::INFINITY, 4), "0,0000");
    }

    #[test]
    fn test_parse_formatted() {
        assert_eq!(parse_amount("1.234.567,89"), 1234567.89);
        assert_eq!(parse_amount("1,00"), 1.0);
        assert_eq!(parse_amount("42"), 42.0);
        assert_eq!(parse_amount("  7,5 "), 7.5);
    }

    #[test]
    fn test_parse_unparsable_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(","), 0.0);
        assert_eq!(parse_amount("--"), 0.0);
    }

    #[test]
    fn test_parse_reads_leading_number() {
        assert_eq!(parse_amount("12,34abc"), 12.34);
        assert_eq!(parse_amount("1,2,3"), 1.2);
        assert_eq!(parse_amount("-3,5"), -3.5);
    }

    #[test]
    fn test_format_parse_round_trip() {
        for &value in &[0.0, 0.01, 1.0, 5.42, 999.99, 1000.0, 123456.78, 98765432.1] {
            assert_eq!(parse_amount(&format_amount(value, 2)), value);
        }
        for &value in &[0.1845, 5.4212, 1234.5678] {
            assert_eq!(parse_amount(&format_amount(value, 4)), value);
        }
    }

    #[test]
    fn test_round_trip_rounds_to_display_precision() {
        let parsed = parse_amount(&format_amount(3.14159, 2));
        assert_eq!(parsed, 3.14);
    }

    #[test]
    fn test_sanitize_strips_invalid_characters() {
        assert_eq!(sanitize_live_input("R$ 12a3"), "123");
        assert_eq!(sanitize_live_input(""), "");
    }

    #[test]
    fn test_sanitize_period_becomes_comma() {
        assert_eq!(sanitize_live_input("10.5"), "10,5");
    }

    #[test]
    fn test_sanitize_truncates_fraction() {
        assert_eq!(sanitize_live_input("10,567"), "10,56");
        assert_eq!(sanitize_live_input("3,"), "3,");
    }

    #[test]
    fn test_sanitize_collapses_extra_commas() {
        assert_eq!(sanitize_live_input("1,2,3"), "1,23");
        assert_eq!(sanitize_live_input("1,,,9"), "1,9");
        assert_eq!(sanitize_live_input("1,2,3,4"), "1,23");
    }
}
