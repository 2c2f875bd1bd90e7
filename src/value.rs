use std::fmt;

use crate::error::DomainError;

/// A computed number as it appears in the operand display.
///
/// Finite values use the shortest decimal form that round-trips, negative
/// zero collapses to `0`, and non-finite values are spelled `Infinity`,
/// `-Infinity` and `NaN` so they can be read back by the tokenizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayValue(pub f64);

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let n = self.0;
        if n.is_nan() {
            write!(f, "NaN")
        } else if n.is_infinite() {
            write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" })
        } else if n == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", n)
        }
    }
}

pub fn format_value(value: f64) -> String {
    DisplayValue(value).to_string()
}

/// Read an operand back into a number.
pub fn parse_operand(text: &str) -> Result<f64, DomainError> {
    match text {
        "Infinity" => Ok(f64::INFINITY),
        "-Infinity" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        _ => text
            .parse()
            .map_err(|_| DomainError::NotANumber(text.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting() {
        let cases = vec![
            (5.0, "5"),
            (-3.0, "-3"),
            (0.1 + 0.2, "0.30000000000000004"),
            (-0.0, "0"),
            (f64::INFINITY, "Infinity"),
            (f64::NEG_INFINITY, "-Infinity"),
            (f64::NAN, "NaN"),
            (std::f64::consts::PI, "3.141592653589793"),
        ];
        for (value, expected) in cases {
            assert_eq!(format_value(value), expected);
        }
    }

    #[test]
    fn operands() {
        assert_eq!(parse_operand("12.5"), Ok(12.5));
        assert_eq!(parse_operand("5."), Ok(5.0));
        assert_eq!(parse_operand("-Infinity"), Ok(f64::NEG_INFINITY));
        assert_eq!(
            parse_operand("Error"),
            Err(DomainError::NotANumber("Error".into()))
        );
        assert!(parse_operand("").is_err());
    }
}
