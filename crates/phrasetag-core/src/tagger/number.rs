//! Numeric normalization for quantity tokens.

use regex::Regex;

use crate::error::{Result, TaggerError};
use crate::tagger::tokenizer::unclump;

/// Parses numeric tokens into comparable values.
#[derive(Debug, Clone)]
pub struct NumberNormalizer {
    re_integer: Regex,
    re_mixed: Regex,
    re_fraction: Regex,
}

impl NumberNormalizer {
    /// Constructs a new `NumberNormalizer` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `TaggerError::RegexError` if any pattern fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_integer: Regex::new(r"^[0-9]+$")?,
            re_mixed: Regex::new(r"^([0-9]+)\s+([0-9])/([0-9])$")?,
            re_fraction: Regex::new(r"^([0-9])/([0-9])$")?,
        })
    }

    /// Parses a token that represents a number, so a quantity stored as a
    /// number can be matched against the way it is written in the phrase.
    ///
    /// Accepts integers (`"2"`), mixed numbers (`"1$1/2"` or `"1 1/2"`) and
    /// simple fractions (`"3/4"`). The result is rounded to 2 decimal places.
    /// Returns `Ok(None)` for anything else.
    ///
    /// # Errors
    ///
    /// Returns `TaggerError::NumberFormat` if a fraction has a zero denominator.
    ///
    /// # Examples
    /// ```
    /// use phrasetag_core::tagger::number::NumberNormalizer;
    ///
    /// let numbers = NumberNormalizer::new().unwrap();
    /// assert_eq!(numbers.parse("1$1/2").unwrap(), Some(1.5));
    /// assert_eq!(numbers.parse("cups").unwrap(), None);
    /// ```
    pub fn parse(&self, token: &str) -> Result<Option<f64>> {
        let s = unclump(token);

        if self.re_integer.is_match(&s) {
            return Ok(s.parse::<f64>().ok().map(round2));
        }

        if let Some(caps) = self.re_mixed.captures(&s) {
            let whole = digits(&caps[1]);
            let fraction = divide(token, &caps[2], &caps[3])?;
            return Ok(Some(round2(whole + fraction)));
        }

        if let Some(caps) = self.re_fraction.captures(&s) {
            return Ok(Some(round2(divide(token, &caps[1], &caps[2])?)));
        }

        Ok(None)
    }
}

/// Round half away from zero at 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn digits(s: &str) -> f64 {
    // patterns only capture [0-9]
    s.parse().unwrap_or(0.0)
}

fn divide(token: &str, numerator: &str, denominator: &str) -> Result<f64> {
    let denominator = digits(denominator);
    if denominator == 0.0 {
        return Err(TaggerError::NumberFormat {
            token: token.to_string(),
        });
    }
    Ok(digits(numerator) / denominator)
}
