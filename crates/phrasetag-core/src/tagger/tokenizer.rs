//! # Tokenizer for Ingredient Phrases
//!
//! Splits ingredient phrases into tokens for sequence labeling.
//! Expands unit abbreviations, separates dual American/metric units and
//! clumps mixed-number fractions so they survive as a single token.

use regex::Regex;

use crate::error::Result;

/// Delimiter characters kept as standalone tokens.
const DELIMITERS: &[char] = &[',', '(', ')'];

/// American units that may be followed by a slash and a metric alternative.
const AMERICAN_UNITS: &[&str] = &[
    "cup",
    "tablespoon",
    "teaspoon",
    "pound",
    "ounce",
    "quart",
    "pint",
];

/// Unicode vulgar fractions and their ASCII spelling.
const UNICODE_FRACTIONS: &[(char, &str)] = &[
    ('\u{215b}', "1/8"),
    ('\u{215c}', "3/8"),
    ('\u{215d}', "5/8"),
    ('\u{215e}', "7/8"),
    ('\u{2159}', "1/6"),
    ('\u{215a}', "5/6"),
    ('\u{2155}', "1/5"),
    ('\u{2156}', "2/5"),
    ('\u{2157}', "3/5"),
    ('\u{2158}', "4/5"),
    ('\u{bc}', "1/4"),
    ('\u{be}', "3/4"),
    ('\u{2153}', "1/3"),
    ('\u{2154}', "2/3"),
    ('\u{bd}', "1/2"),
];

/// Tokenizer for ingredient phrases.
///
/// Holds the pre-compiled rewrite patterns; cheap to share across threads.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    re_grams: Regex,
    re_ounces: Regex,
    re_milliliters: Regex,
    re_fraction: Regex,
    re_markup: Regex,
}

impl Tokenizer {
    /// Constructs a new `Tokenizer` with pre-compiled regex patterns.
    ///
    /// # Errors
    ///
    /// Returns `TaggerError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_grams: Regex::new(r"([0-9]+)g")?,
            re_ounces: Regex::new(r"([0-9]+)oz")?,
            re_milliliters: Regex::new(r"(?i)([0-9]+)ml")?,
            re_fraction: Regex::new(r"([0-9]+)\s+([0-9])/([0-9])")?,
            re_markup: Regex::new(r"<[^<]+?>")?,
        })
    }

    /// Tokenize a phrase into a sequence of trimmed, non-empty tokens.
    ///
    /// Commas and parentheses are kept as tokens of their own.
    ///
    /// # Examples
    /// ```
    /// use phrasetag_core::tagger::tokenizer::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new().unwrap();
    /// let tokens = tokenizer.tokenize("2 1/2 cups/300 grams all-purpose flour");
    /// assert_eq!(tokens, ["2$1/2", "cups", "300", "grams", "all-purpose", "flour"]);
    /// ```
    pub fn tokenize(&self, input: &str) -> Vec<String> {
        let rewritten = self.clump_fractions(&self.rewrite_units(input));

        let mut tokens = Vec::new();
        let mut current_start = 0;

        for (idx, c) in rewritten.char_indices() {
            if c.is_whitespace() || DELIMITERS.contains(&c) {
                push_token(&mut tokens, &rewritten[current_start..idx]);
                if !c.is_whitespace() {
                    tokens.push(c.to_string());
                }
                current_start = idx + c.len_utf8();
            }
        }
        push_token(&mut tokens, &rewritten[current_start..]);

        tokens
    }

    /// Apply the unit rewrites without splitting.
    ///
    /// `100g` becomes `100 grams`, `8oz` becomes `8 ounces`, `15ml` becomes
    /// `15 milliliters`, and a slash after an American unit becomes a space.
    pub fn rewrite_units(&self, input: &str) -> String {
        let s = self.re_grams.replace_all(input, "${1} grams");
        let s = self.re_ounces.replace_all(&s, "${1} ounces");
        let mut s = self
            .re_milliliters
            .replace_all(&s, "${1} milliliters")
            .into_owned();

        for unit in AMERICAN_UNITS {
            s = s.replace(&format!("{unit}/"), &format!("{unit} "));
            s = s.replace(&format!("{unit}s/"), &format!("{unit}s "));
        }
        s
    }

    /// Replace the whitespace between the integer and fractional part of a
    /// quantity with `$`, so it is tokenized as a single unit.
    ///
    /// `"aaa 1 2/3 bbb"` becomes `"aaa 1$2/3 bbb"`.
    pub fn clump_fractions(&self, input: &str) -> String {
        self.re_fraction
            .replace_all(input, "${1}$$${2}/${3}")
            .into_owned()
    }

    /// Remove HTML-like markup tags.
    pub fn strip_markup(&self, input: &str) -> String {
        self.re_markup.replace_all(input, "").into_owned()
    }
}

fn push_token(tokens: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}

/// Reverse of [`Tokenizer::clump_fractions`]: `$` becomes a space.
pub fn unclump(token: &str) -> String {
    token.replace('$', " ")
}

/// Replace unicode fractions with their ASCII spelling, preceded by a space.
///
/// `"1\u{215e}"` becomes `"1 7/8"`.
pub fn clean_unicode_fractions(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match UNICODE_FRACTIONS.iter().find(|(uc, _)| *uc == c) {
            Some((_, ascii)) => {
                out.push(' ');
                out.push_str(ascii);
            }
            None => out.push(c),
        }
    }
    out
}
