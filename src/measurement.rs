use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Value/uncertainty pair, e.g. "5,0 ± 0,2". The separator class also
    // accepts '+' and '-', so "5-2" splits into value 5 and error 2; a
    // leading-minus number never matches and falls through to the plain
    // parse below.
    static ref PAIR_PATTERN: Regex =
        Regex::new(r"^([\d.,]+)\s*[±+\-]\s*([\d.,]+)").unwrap();
}

/// One observed quantity: a value and an optional uncertainty, both read
/// from a single spreadsheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub error: Option<f64>,
}

impl Measurement {
    pub fn new(value: f64, error: Option<f64>) -> Self {
        Self { value, error }
    }
}

fn parse_float(text: &str) -> Option<f64> {
    text.trim().replace(',', ".").parse::<f64>().ok()
}

/// Parses a cell into a [`Measurement`], treating ',' as the decimal
/// separator. Returns `None` when the cell has no numeric interpretation;
/// callers treat that as a missing value, not an error.
pub fn parse_cell(cell: &str) -> Option<Measurement> {
    if let Some(caps) = PAIR_PATTERN.captures(cell) {
        if let (Some(value), Some(error)) = (parse_float(&caps[1]), parse_float(&caps[2])) {
            return Some(Measurement::new(value, Some(error)));
        }
    }
    parse_float(cell).map(|value| Measurement::new(value, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_with_comma_decimals() {
        let m = parse_cell("5,0 ± 0,2").unwrap();
        assert_eq!(m.value, 5.0);
        assert_eq!(m.error, Some(0.2));
    }

    #[test]
    fn plain_number_has_no_error() {
        let m = parse_cell("5.0").unwrap();
        assert_eq!(m.value, 5.0);
        assert_eq!(m.error, None);
    }

    #[test]
    fn text_is_missing() {
        assert_eq!(parse_cell("abc"), None);
    }

    #[test]
    fn minus_acts_as_separator_after_a_number() {
        let m = parse_cell("5-2").unwrap();
        assert_eq!(m.value, 5.0);
        assert_eq!(m.error, Some(2.0));
    }

    #[test]
    fn leading_minus_number_stays_plain() {
        let m = parse_cell("-5,2").unwrap();
        assert_eq!(m.value, -5.2);
        assert_eq!(m.error, None);
    }
}
