//! # Weak-Supervision Label Alignment
//!
//! Matches phrase tokens against a record's separately recorded fields.
//! A token may be explained by several fields at once; the ambiguity is kept
//! here and resolved later by [`best_tag`](crate::tagger::bio_tags::best_tag).

use tracing::debug;

use crate::tagger::bio_tags::{CandidateTags, Field};
use crate::tagger::inflect::Singularize;
use crate::tagger::number::{round2, NumberNormalizer};
use crate::tagger::tokenizer::Tokenizer;
use crate::types::Record;

/// The value a field holds, prepared for comparison.
#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    /// Singularized sub-tokens of a text field.
    Text(Vec<String>),
    /// A non-zero numeric field, rounded to 2 places.
    Number(f64),
    /// Empty text or a zero number; never matches.
    Absent,
}

/// Aligns tokens of one record to its structured fields.
pub struct LabelAligner<'a, S: Singularize> {
    labels: Vec<(Field, FieldValue)>,
    numbers: &'a NumberNormalizer,
    singularizer: &'a S,
}

impl<'a, S: Singularize> LabelAligner<'a, S> {
    /// Prepares the field labels of `record`.
    ///
    /// Text fields are tokenized with the same tokenizer as the phrase and
    /// singularized once up front.
    pub fn new(
        record: &Record,
        tokenizer: &Tokenizer,
        numbers: &'a NumberNormalizer,
        singularizer: &'a S,
    ) -> Self {
        let labels = Field::all_fields()
            .iter()
            .map(|&field| {
                let value = match field {
                    Field::Name => text_value(&record.name, tokenizer, singularizer),
                    Field::Unit => text_value(&record.unit, tokenizer, singularizer),
                    Field::Comment => text_value(&record.comment, tokenizer, singularizer),
                    Field::Qty => number_value(record.quantity),
                    Field::RangeEnd => number_value(record.range_end),
                };
                (field, value)
            })
            .collect();

        Self {
            labels,
            numbers,
            singularizer,
        }
    }

    /// Returns every field that plausibly explains `token`.
    ///
    /// Fields are visited in priority order. A text field contributes one
    /// entry per matching sub-token, so repeated words yield repeated tags.
    pub fn match_candidates(&self, token: &str) -> CandidateTags {
        let normalized = self.singularizer.singularize(token);
        let number = match self.numbers.parse(token) {
            Ok(number) => number,
            Err(err) => {
                debug!(token, %err, "skipping numeric alignment");
                None
            }
        };

        let mut candidates = Vec::new();
        for (field, value) in &self.labels {
            match value {
                FieldValue::Text(sub_tokens) => {
                    let hits = sub_tokens.iter().filter(|t| **t == normalized).count();
                    candidates.extend(std::iter::repeat_n(*field, hits));
                }
                FieldValue::Number(expected) => {
                    if number.is_some_and(|n| (n - expected).abs() < 1e-9) {
                        candidates.push(*field);
                    }
                }
                FieldValue::Absent => {}
            }
        }
        candidates
    }
}

fn text_value<S: Singularize>(value: &str, tokenizer: &Tokenizer, singularizer: &S) -> FieldValue {
    let sub_tokens: Vec<String> = tokenizer
        .tokenize(value)
        .iter()
        .map(|t| singularizer.singularize(t))
        .collect();
    if sub_tokens.is_empty() {
        FieldValue::Absent
    } else {
        FieldValue::Text(sub_tokens)
    }
}

fn number_value(value: f64) -> FieldValue {
    if value == 0.0 || !value.is_finite() {
        FieldValue::Absent
    } else {
        FieldValue::Number(round2(value))
    }
}
