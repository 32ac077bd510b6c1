//! # BIO Tags for Ingredient Fields
//!
//! Defines the tag set for sequence labeling of ingredient phrases and the
//! tagger that turns per-token candidate fields into a single BIO tag.
//! Uses the BIO (Begin-Inside-Outside) chunking scheme.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record fields a token can be aligned to.
///
/// Variant order is the alignment priority: name, unit, qty, comment, range_end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Unit,
    Qty,
    Comment,
    RangeEnd,
}

impl Field {
    /// All fields in alignment priority order.
    pub fn all_fields() -> &'static [Field] {
        &[
            Field::Name,
            Field::Unit,
            Field::Qty,
            Field::Comment,
            Field::RangeEnd,
        ]
    }

    /// Upper-case tag name, e.g. `"RANGE_END"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "NAME",
            Field::Unit => "UNIT",
            Field::Qty => "QTY",
            Field::Comment => "COMMENT",
            Field::RangeEnd => "RANGE_END",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all_fields()
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Candidate fields for one token, in priority order, duplicates kept.
pub type CandidateTags = Vec<Field>;

/// BIO tag for one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BioTag {
    /// First token of a field span.
    Begin(Field),
    /// Continuation of a field span.
    Inside(Field),
    /// Token not attributed to any field.
    Other,
}

impl BioTag {
    /// Check if this is a "Begin" tag.
    pub fn is_begin(&self) -> bool {
        matches!(self, BioTag::Begin(_))
    }

    /// Check if this is an "Inside" tag.
    pub fn is_inside(&self) -> bool {
        matches!(self, BioTag::Inside(_))
    }

    /// Get the field for this tag.
    pub fn field(&self) -> Option<Field> {
        match self {
            BioTag::Begin(field) | BioTag::Inside(field) => Some(*field),
            BioTag::Other => None,
        }
    }
}

impl fmt::Display for BioTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BioTag::Begin(field) => write!(f, "B-{field}"),
            BioTag::Inside(field) => write!(f, "I-{field}"),
            BioTag::Other => write!(f, "OTHER"),
        }
    }
}

impl FromStr for BioTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "OTHER" {
            return Ok(BioTag::Other);
        }
        if let Some(field) = s.strip_prefix("B-") {
            return field.parse().map(BioTag::Begin);
        }
        if let Some(field) = s.strip_prefix("I-") {
            return field.parse().map(BioTag::Inside);
        }
        Err(UnknownTag(s.to_string()))
    }
}

/// A tag string that is not part of the tag set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag: {0:?}")]
pub struct UnknownTag(pub String);

/// Prefixes every candidate with `B-` or `I-`.
///
/// A candidate continues a span (`I-`) when the same field was among the
/// previous token's candidates. The first token has no predecessor, so all
/// of its candidates begin a span.
pub fn add_prefixes(candidates: &[CandidateTags]) -> Vec<Vec<BioTag>> {
    let mut prev: &[Field] = &[];
    let mut prefixed = Vec::with_capacity(candidates.len());

    for tags in candidates {
        prefixed.push(
            tags.iter()
                .map(|&field| {
                    if prev.contains(&field) {
                        BioTag::Inside(field)
                    } else {
                        BioTag::Begin(field)
                    }
                })
                .collect(),
        );
        prev = tags;
    }

    prefixed
}

/// Picks one tag out of the prefixed candidates.
///
/// A lone candidate wins. With several, the first non-comment candidate
/// wins. Otherwise there is no good guess and the token is `OTHER`.
pub fn best_tag(tags: &[BioTag]) -> BioTag {
    if let [only] = tags {
        return *only;
    }
    tags.iter()
        .copied()
        .find(|tag| tag.field() != Some(Field::Comment))
        .unwrap_or(BioTag::Other)
}

/// Assigns one BIO tag per token from its candidate fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct BioTagger;

impl BioTagger {
    /// Create a new tagger instance.
    pub fn new() -> Self {
        Self
    }

    /// Tags a sequence of `(token, candidates)` pairs, preserving order.
    pub fn assign<T: Clone>(&self, items: &[(T, CandidateTags)]) -> Vec<(T, BioTag)> {
        let candidates: Vec<CandidateTags> = items.iter().map(|(_, tags)| tags.clone()).collect();
        items
            .iter()
            .zip(add_prefixes(&candidates))
            .map(|((token, _), prefixed)| (token.clone(), best_tag(&prefixed)))
            .collect()
    }
}
