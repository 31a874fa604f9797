//! Display helpers. Numbers follow French grouping (narrow no-break space,
//! decimal comma) because that is what the community sheets use.

const GROUP_SEPARATOR: char = '\u{202F}';
const DECIMAL_SEPARATOR: char = ',';
const MAX_FRACTION_DIGITS: usize = 3;

/// Half-up rounding to the nearest integer (ties go toward +∞).
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

pub fn format_auec(value: f64) -> String {
    format!("{} aUEC", format_number(round_half_up(value)))
}

pub fn format_auec_per_hour(value: f64) -> String {
    format!("{} aUEC/h", format_number(round_half_up(value)))
}

/// Groups thousands and keeps up to three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut output = String::new();
    if value.is_sign_negative() && !is_zero {
        output.push('-');
    }
    output.push_str(&grouped);
    if !frac_part.is_empty() {
        output.push(DECIMAL_SEPARATOR);
        output.push_str(frac_part);
    }
    output
}

/// Reads a form field. Blank or unparsable input counts as zero.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Shortest text for putting a number back into an input field.
pub fn input_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-0.4), 0.0);
        assert!(round_half_up(-0.4).is_sign_positive());
        assert_eq!(round_half_up(f64::NAN), 0.0);
    }

    #[test]
    fn formats_french_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1_234.0), "1\u{202F}234");
        assert_eq!(format_number(1_234_567.0), "1\u{202F}234\u{202F}567");
        assert_eq!(format_number(-80_000.0), "-80\u{202F}000");
        assert_eq!(format_number(1.5), "1,5");
    }

    #[test]
    fn formats_currency() {
        assert_eq!(format_auec(1_499.5), "1\u{202F}500 aUEC");
        assert_eq!(format_auec_per_hour(1_200.0), "1\u{202F}200 aUEC/h");
        assert_eq!(format_auec(-0.2), "0 aUEC");
    }

    #[test]
    fn parses_form_fields_leniently() {
        assert_eq!(parse_number(" 42 "), 42.0);
        assert_eq!(parse_number("1e3"), 1_000.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
    }

    #[test]
    fn input_value_drops_trailing_zero() {
        assert_eq!(input_value(500.0), "500");
        assert_eq!(input_value(12.5), "12.5");
    }
}
