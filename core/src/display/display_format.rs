// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns the numeric result of the calculator into the text shown in the display.

use std::{fmt::{Display, Formatter, Result},
          str::FromStr};

use serde::{Deserialize, Serialize};

use crate::CalcError;

pub const MAX_FORMAT_DIGITS: u8 = 15;
pub const UNDEFINED_DISPLAY_TEXT: &str = "?";

/// How many digits are shown after the decimal point, and whether the value is shown in
/// fixed or scientific notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayFormat {
    Fixed(u8),
    Sci(u8),
}

impl Default for DisplayFormat {
    fn default() -> Self { Self::Fixed(2) }
}

impl DisplayFormat {
    fn digits(self) -> usize {
        match self {
            Self::Fixed(digits) | Self::Sci(digits) => {
                usize::from(digits.min(MAX_FORMAT_DIGITS))
            }
        }
    }

    /// An undefined value is shown as `?`.
    #[must_use]
    pub fn format_value(self, maybe_value: Option<f64>) -> String {
        match maybe_value {
            None => UNDEFINED_DISPLAY_TEXT.to_owned(),
            Some(value) => self.format_f64(value),
        }
    }

    #[must_use]
    pub fn format_f64(self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }
        if value.is_infinite() {
            return if value.is_sign_negative() { "-∞" } else { "∞" }.to_owned();
        }

        match self {
            Self::Fixed(_) => format_fixed(value, self.digits()),
            Self::Sci(_) => format_sci(value, self.digits()),
        }
    }
}

/// `1234.5` with 2 digits is `1,234.50`.
fn format_fixed(value: f64, digits: usize) -> String {
    let unsigned = format!("{:.*}", digits, value.abs());
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned.as_str(), None),
    };

    let grouped = group_thousands(int_part);
    let is_zero = unsigned.chars().all(|ch| ch == '0' || ch == '.');
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac_part) => format!("{sign}{grouped}.{frac_part}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `12345` with 2 digits is `1.23E4`.
fn format_sci(value: f64, digits: usize) -> String {
    format!("{:.*e}", digits, value).replace('e', "E")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut acc = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            acc.push(',');
        }
        acc.push(ch);
    }
    acc
}

/// The history line shown above the display, eg: `2×3+4=`.
#[must_use]
pub fn history_line(description: &str) -> String { format!("{description}=") }

impl Display for DisplayFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Fixed(digits) => write!(f, "fix {digits}"),
            Self::Sci(digits) => write!(f, "sci {digits}"),
        }
    }
}

/// Parses `fix 2` or `sci 4` (case insensitive, the space is optional).
impl FromStr for DisplayFormat {
    type Err = CalcError;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let input = input.trim().to_lowercase();
        let split_at = input
            .find(|ch: char| ch.is_ascii_digit() || ch.is_whitespace())
            .unwrap_or(input.len());
        let (style, digits) = input.split_at(split_at);
        let digits = digits.trim();

        let parsed_digits = digits
            .parse::<u8>()
            .ok()
            .filter(|it| *it <= MAX_FORMAT_DIGITS)
            .ok_or_else(|| CalcError::InvalidFormatDigits {
                digits: digits.to_owned(),
                max: MAX_FORMAT_DIGITS,
            });

        match style {
            "fix" => Ok(Self::Fixed(parsed_digits?)),
            "sci" => Ok(Self::Sci(parsed_digits?)),
            _ => Err(CalcError::UnknownFormatStyle {
                style: style.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(DisplayFormat::Fixed(2), 1234.5, "1,234.50" ; "fixed grouped")]
    #[test_case(DisplayFormat::Fixed(0), 999.0, "999" ; "fixed no digits")]
    #[test_case(DisplayFormat::Fixed(3), -1_234_567.0, "-1,234,567.000" ; "fixed negative")]
    #[test_case(DisplayFormat::Fixed(2), -0.001, "0.00" ; "fixed negative zero")]
    #[test_case(DisplayFormat::Sci(2), 12345.0, "1.23E4" ; "sci")]
    #[test_case(DisplayFormat::Sci(1), 0.00042, "4.2E-4" ; "sci negative exponent")]
    #[test_case(DisplayFormat::Fixed(2), f64::INFINITY, "∞" ; "infinity")]
    #[test_case(DisplayFormat::Sci(2), f64::NEG_INFINITY, "-∞" ; "negative infinity")]
    #[test_case(DisplayFormat::Fixed(2), f64::NAN, "NaN" ; "not a number")]
    fn test_format_f64(format: DisplayFormat, value: f64, expected: &str) {
        assert_eq2!(format.format_f64(value), expected);
    }

    #[test]
    fn test_undefined_value() {
        assert_eq2!(DisplayFormat::default().format_value(None), "?");
        assert_eq2!(DisplayFormat::default().format_value(Some(7.0)), "7.00");
    }

    #[test]
    fn test_history_line() {
        assert_eq2!(history_line("2×3+4"), "2×3+4=");
    }

    #[test_case("fix 2", Ok(DisplayFormat::Fixed(2)) ; "fixed")]
    #[test_case("SCI4", Ok(DisplayFormat::Sci(4)) ; "upper case without space")]
    #[test_case(" sci   10 ", Ok(DisplayFormat::Sci(10)) ; "extra whitespace")]
    #[test_case("fix 16", Err(CalcError::InvalidFormatDigits { digits: "16".into(), max: 15 }) ; "too many digits")]
    #[test_case("fix", Err(CalcError::InvalidFormatDigits { digits: String::new(), max: 15 }) ; "missing digits")]
    #[test_case("eng 3", Err(CalcError::UnknownFormatStyle { style: "eng".into() }) ; "unknown style")]
    fn test_parse(input: &str, expected: std::result::Result<DisplayFormat, CalcError>) {
        assert_eq2!(input.parse::<DisplayFormat>(), expected);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let format = DisplayFormat::Sci(3);
        assert_eq2!(format.to_string().parse::<DisplayFormat>(), Ok(format));
    }
}
