//! # Token Features
//!
//! Positional and shape features shared by the training corpus and the
//! inference corpus. Both sides must go through [`features`] so the tagger
//! engine sees the same feature vocabulary at training and decoding time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exclusive upper bounds of the sequence-length buckets.
const LENGTH_BUCKETS: &[usize] = &[4, 8, 12, 16, 20];

/// Feature columns for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFeatures {
    /// 1-based position of the token in its phrase.
    pub index: usize,
    /// Length bucket of the whole token sequence.
    pub length_group: String,
    /// Token starts with an ASCII capital letter.
    pub capitalized: bool,
    /// Token sits inside parentheses.
    pub in_parenthesis: bool,
}

impl TokenFeatures {
    /// The four feature columns in corpus order.
    pub fn columns(&self) -> [String; 4] {
        [
            format!("I{}", self.index),
            format!("L{}", self.length_group),
            format!("{}CAP", yes_no(self.capitalized)),
            format!("{}PAREN", yes_no(self.in_parenthesis)),
        ]
    }
}

impl fmt::Display for TokenFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.columns().join("\t"))
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Computes the features of `token` at 1-based `index` within `tokens`.
pub fn features(token: &str, index: usize, tokens: &[String]) -> TokenFeatures {
    TokenFeatures {
        index,
        length_group: length_group(tokens.len()),
        capitalized: is_capitalized(token),
        in_parenthesis: inside_parenthesis(token, tokens),
    }
}

/// Buckets the length of a phrase into one of six groups.
///
/// # Examples
/// ```
/// use phrasetag_core::tagger::features::length_group;
///
/// assert_eq!(length_group(4), "8");
/// assert_eq!(length_group(25), "X");
/// ```
pub fn length_group(actual_length: usize) -> String {
    LENGTH_BUCKETS
        .iter()
        .find(|&&n| actual_length < n)
        .map_or_else(|| "X".to_string(), |n| n.to_string())
}

/// Returns true if the token starts with an ASCII capital letter.
pub fn is_capitalized(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

/// Returns true if the token is inside parentheses in the phrase.
///
/// Either the token is itself wrapped in `(...)`, or the space-joined phrase
/// has an opening parenthesis before some occurrence of the token and a
/// closing one after it.
pub fn inside_parenthesis(token: &str, tokens: &[String]) -> bool {
    if token.starts_with('(') && token.ends_with(')') {
        return true;
    }

    let line = tokens.join(" ");
    let Some(open) = line.find('(') else {
        return false;
    };
    let after_open = open + 1;
    let Some(found) = line[after_open..].find(token) else {
        return false;
    };
    let token_end = after_open + found + token.len();
    line.rfind(')').is_some_and(|close| close >= token_end)
}
