//! # Record Translator
//!
//! Turns labelled records into tagger-engine training lines, and raw phrases
//! into untagged feature lines for decoding.
//!
//! Both modes share [`Translator::prepare_input`], the tokenizer and the
//! feature extractor, so a phrase produces the same feature columns whether
//! it is being trained on or tagged.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tagger::align::LabelAligner;
use crate::tagger::bio_tags::{BioTag, BioTagger, CandidateTags};
use crate::tagger::features::{features, TokenFeatures};
use crate::tagger::inflect::{EnglishSingularizer, Singularize};
use crate::tagger::number::NumberNormalizer;
use crate::tagger::tokenizer::{clean_unicode_fractions, Tokenizer};
use crate::types::Record;

/// A token with its features and chosen tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: String,
    pub features: TokenFeatures,
    pub tag: BioTag,
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.token, self.features, self.tag)
    }
}

/// Translates records and phrases into corpus lines.
#[derive(Debug, Clone)]
pub struct Translator<S: Singularize = EnglishSingularizer> {
    tokenizer: Tokenizer,
    numbers: NumberNormalizer,
    tagger: BioTagger,
    singularizer: S,
}

impl Translator<EnglishSingularizer> {
    /// Create a translator with the default English singularizer.
    pub fn new() -> Result<Self> {
        Self::with_singularizer(EnglishSingularizer)
    }
}

impl<S: Singularize> Translator<S> {
    /// Create a translator with a custom singularizer.
    pub fn with_singularizer(singularizer: S) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            numbers: NumberNormalizer::new()?,
            tagger: BioTagger::new(),
            singularizer,
        })
    }

    /// Normalization applied to every phrase before tokenizing: markup is
    /// stripped and unicode fractions are spelled out.
    pub fn prepare_input(&self, text: &str) -> String {
        clean_unicode_fractions(&self.tokenizer.strip_markup(text))
    }

    /// Tokenize a phrase exactly as both corpus modes do.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(&self.prepare_input(text))
    }

    /// Aligns and tags every token of `record`.
    ///
    /// Alignment runs once per distinct token; every occurrence still gets
    /// its own position features and its own entry in the output.
    pub fn tag_record(&self, record: &Record) -> Vec<TaggedToken> {
        let tokens = self.tokens(&record.input);
        let aligner = LabelAligner::new(record, &self.tokenizer, &self.numbers, &self.singularizer);

        let mut cache: HashMap<&str, CandidateTags> = HashMap::new();
        let aligned: Vec<(usize, CandidateTags)> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let candidates = cache
                    .entry(token.as_str())
                    .or_insert_with(|| aligner.match_candidates(token))
                    .clone();
                (i, candidates)
            })
            .collect();

        self.tagger
            .assign(&aligned)
            .into_iter()
            .map(|(i, tag)| TaggedToken {
                token: tokens[i].clone(),
                features: features(&tokens[i], i + 1, &tokens),
                tag,
            })
            .collect()
    }

    /// Translates a record into training lines.
    ///
    /// ```text
    /// 2\tI1\tL4\tNoCAP\tNoPAREN\tB-QTY
    /// cups\tI2\tL4\tNoCAP\tNoPAREN\tB-UNIT
    /// flour\tI3\tL4\tNoCAP\tNoPAREN\tB-NAME
    /// ```
    ///
    /// Every line ends with a newline; no blank line follows the record.
    pub fn translate_record(&self, record: &Record) -> String {
        self.tag_record(record)
            .iter()
            .map(|tagged| format!("{tagged}\n"))
            .collect()
    }

    /// Translates many records, separated by one blank line each. Records
    /// without tokens are left out.
    pub fn translate_records(&self, records: &[Record]) -> String {
        records
            .iter()
            .map(|record| self.translate_record(record))
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Feature lines for a raw phrase, without a tag column.
    pub fn feature_lines(&self, text: &str) -> Vec<String> {
        let tokens = self.tokens(text);
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| format!("{token}\t{}", features(token, i + 1, &tokens)))
            .collect()
    }

    /// Inference-mode rendering of one phrase, newline-terminated lines.
    pub fn export_text(&self, text: &str) -> String {
        self.feature_lines(text)
            .iter()
            .map(|line| format!("{line}\n"))
            .collect()
    }

    /// Inference-mode corpus for many phrases, separated by blank lines.
    /// Phrases without tokens are left out.
    pub fn export_lines<'t>(&self, lines: impl IntoIterator<Item = &'t str>) -> String {
        lines
            .into_iter()
            .map(|line| self.export_text(line))
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::bio_tags::Field;
    use crate::tagger::inflect::IdentitySingularizer;

    fn translator() -> Translator {
        Translator::new().unwrap()
    }

    fn assert_translates(record: Record, expected: &[&str]) {
        let actual = translator().translate_record(&record);
        let expected = expected.join("\n");
        assert_eq!(actual.trim_end(), expected);
    }

    #[test]
    fn test_translates_simple_phrase() {
        let record = Record::new("2 cups flour")
            .with_name("flour")
            .with_unit("cup")
            .with_quantity(2.0);
        assert_translates(
            record,
            &[
                "2\tI1\tL4\tNoCAP\tNoPAREN\tB-QTY",
                "cups\tI2\tL4\tNoCAP\tNoPAREN\tB-UNIT",
                "flour\tI3\tL4\tNoCAP\tNoPAREN\tB-NAME",
            ],
        );
    }

    #[test]
    fn test_translates_simple_fraction() {
        let record = Record::new("1/2 cup yellow cornmeal")
            .with_name("yellow cornmeal")
            .with_unit("cup")
            .with_quantity(0.5);
        assert_translates(
            record,
            &[
                "1/2\tI1\tL8\tNoCAP\tNoPAREN\tB-QTY",
                "cup\tI2\tL8\tNoCAP\tNoPAREN\tB-UNIT",
                "yellow\tI3\tL8\tNoCAP\tNoPAREN\tB-NAME",
                "cornmeal\tI4\tL8\tNoCAP\tNoPAREN\tI-NAME",
            ],
        );
    }

    #[test]
    fn test_translates_mixed_number() {
        let record = Record::new("1 1/2 teaspoons salt")
            .with_name("salt")
            .with_unit("teaspoon")
            .with_quantity(1.5);
        assert_translates(
            record,
            &[
                "1$1/2\tI1\tL4\tNoCAP\tNoPAREN\tB-QTY",
                "teaspoons\tI2\tL4\tNoCAP\tNoPAREN\tB-UNIT",
                "salt\tI3\tL4\tNoCAP\tNoPAREN\tB-NAME",
            ],
        );
    }

    #[test]
    fn test_translates_range_with_non_ascii() {
        let record = Record::new("2 to 3 teaspoons minced jalape\u{f1}o")
            .with_name("jalape\u{f1}os")
            .with_unit("teaspoon")
            .with_quantity(2.0)
            .with_range_end(3.0)
            .with_comment("minced");
        assert_translates(
            record,
            &[
                "2\tI1\tL8\tNoCAP\tNoPAREN\tB-QTY",
                "to\tI2\tL8\tNoCAP\tNoPAREN\tOTHER",
                "3\tI3\tL8\tNoCAP\tNoPAREN\tB-RANGE_END",
                "teaspoons\tI4\tL8\tNoCAP\tNoPAREN\tB-UNIT",
                "minced\tI5\tL8\tNoCAP\tNoPAREN\tB-COMMENT",
                "jalape\u{f1}o\tI6\tL8\tNoCAP\tNoPAREN\tB-NAME",
            ],
        );
    }

    #[test]
    fn test_translates_comment() {
        let record = Record::new("Half a vanilla bean, split lengthwise, seeds scraped")
            .with_name("vanilla bean")
            .with_quantity(0.5)
            .with_comment("split lengthwise, seeds scraped");
        assert_translates(
            record,
            &[
                "Half\tI1\tL12\tYesCAP\tNoPAREN\tOTHER",
                "a\tI2\tL12\tNoCAP\tNoPAREN\tOTHER",
                "vanilla\tI3\tL12\tNoCAP\tNoPAREN\tB-NAME",
                "bean\tI4\tL12\tNoCAP\tNoPAREN\tI-NAME",
                ",\tI5\tL12\tNoCAP\tNoPAREN\tB-COMMENT",
                "split\tI6\tL12\tNoCAP\tNoPAREN\tI-COMMENT",
                "lengthwise\tI7\tL12\tNoCAP\tNoPAREN\tI-COMMENT",
                ",\tI8\tL12\tNoCAP\tNoPAREN\tI-COMMENT",
                "seeds\tI9\tL12\tNoCAP\tNoPAREN\tI-COMMENT",
                "scraped\tI10\tL12\tNoCAP\tNoPAREN\tI-COMMENT",
            ],
        );
    }

    #[test]
    fn test_translates_complex_row_with_repeated_tokens() {
        let record = Record::new(
            "1 1/4 cups cooked and pureed fresh butternut squash, \
             or 1 10-ounce package frozen squash, defrosted",
        )
        .with_name("butternut squash")
        .with_unit("cup")
        .with_quantity(1.25)
        .with_comment("cooked and pureed fresh, or 1 10-ounce package frozen squash, defrosted");
        assert_translates(
            record,
            &[
                "1$1/4\tI1\tL20\tNoCAP\tNoPAREN\tB-QTY",
                "cups\tI2\tL20\tNoCAP\tNoPAREN\tB-UNIT",
                "cooked\tI3\tL20\tNoCAP\tNoPAREN\tB-COMMENT",
                "and\tI4\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "pureed\tI5\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "fresh\tI6\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "butternut\tI7\tL20\tNoCAP\tNoPAREN\tB-NAME",
                "squash\tI8\tL20\tNoCAP\tNoPAREN\tI-NAME",
                ",\tI9\tL20\tNoCAP\tNoPAREN\tOTHER",
                "or\tI10\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "1\tI11\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "10-ounce\tI12\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "package\tI13\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "frozen\tI14\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
                "squash\tI15\tL20\tNoCAP\tNoPAREN\tB-NAME",
                ",\tI16\tL20\tNoCAP\tNoPAREN\tOTHER",
                "defrosted\tI17\tL20\tNoCAP\tNoPAREN\tI-COMMENT",
            ],
        );
    }

    #[test]
    fn test_translates_row_with_multiple_ingredients() {
        let record = Record::new(
            "4 to 6 tablespoons fresh lime juice, as needed, plus \
             4 to 6 slices of lime, for garnish",
        )
        .with_name("fresh lime juice, as needed, plus 4 to 6 slices of lime, for garnish")
        .with_unit("tablespoon")
        .with_quantity(4.0)
        .with_range_end(6.0);

        let lines = translator().translate_record(&record);
        let tags: Vec<&str> = lines
            .lines()
            .map(|line| line.rsplit('\t').next().unwrap())
            .collect();
        assert_eq!(tags.len(), 21);
        assert_eq!(tags[0], "B-NAME");
        assert_eq!(tags[3], "B-UNIT");
        assert_eq!(tags[4], "B-NAME");
        assert!(tags[5..].iter().all(|tag| *tag == "I-NAME"));
        assert!(lines.lines().all(|line| line.contains("\tLX\t")));
    }

    #[test]
    fn test_bio_continuity() {
        let record = Record::new("1 cup peeled and cooked fresh chestnuts (about 20), or 1 cup canned")
            .with_name("chestnuts")
            .with_unit("cup")
            .with_quantity(1.0)
            .with_comment("peeled and cooked fresh (about 20), or 1 cup canned");
        let tagged = translator().tag_record(&record);
        assert!(tagged[0].tag.field().is_none() || tagged[0].tag.is_begin());
        for pair in tagged.windows(2) {
            let (prev, next) = (&pair[0].tag, &pair[1].tag);
            if next.field().is_some() && prev.field() == next.field() {
                assert!(next.is_inside(), "{} then {}", pair[0], pair[1]);
            }
        }
        assert_eq!(tagged[6].tag, BioTag::Begin(Field::Name));
    }

    #[test]
    fn test_translation_is_deterministic() {
        let translator = translator();
        let record = Record::new("2 1/2 cups/300 grams all-purpose flour")
            .with_name("all-purpose flour")
            .with_unit("cup")
            .with_quantity(2.5);
        let first = translator.translate_record(&record);
        for _ in 0..5 {
            assert_eq!(first, translator.translate_record(&record));
        }
    }

    #[test]
    fn test_inference_features_match_training_features() {
        let translator = translator();
        for text in [
            "2 cups flour",
            "1\u{bd} cups <b>sugar</b> (packed)",
            "Half a vanilla bean, split lengthwise, seeds scraped",
        ] {
            let record = Record::new(text).with_name("flour");
            let training: Vec<String> = translator
                .translate_record(&record)
                .lines()
                .map(|line| line.rsplit_once('\t').unwrap().0.to_string())
                .collect();
            assert_eq!(training, translator.feature_lines(text), "text: {text}");
        }
    }

    #[test]
    fn test_translate_records_separates_with_blank_line() {
        let records = vec![
            Record::new("2 cups flour").with_name("flour"),
            Record::new("salt").with_name("salt"),
        ];
        let corpus = translator().translate_records(&records);
        assert_eq!(
            corpus,
            "2\tI1\tL4\tNoCAP\tNoPAREN\tOTHER\n\
             cups\tI2\tL4\tNoCAP\tNoPAREN\tOTHER\n\
             flour\tI3\tL4\tNoCAP\tNoPAREN\tB-NAME\n\
             \n\
             salt\tI1\tL4\tNoCAP\tNoPAREN\tB-NAME\n"
        );
    }

    #[test]
    fn test_export_lines() {
        let exported = translator().export_lines(["2 cups flour", "Salt"]);
        assert_eq!(
            exported,
            "2\tI1\tL4\tNoCAP\tNoPAREN\n\
             cups\tI2\tL4\tNoCAP\tNoPAREN\n\
             flour\tI3\tL4\tNoCAP\tNoPAREN\n\
             \n\
             Salt\tI1\tL4\tYesCAP\tNoPAREN\n"
        );
    }

    #[test]
    fn test_empty_input_produces_no_lines() {
        assert_eq!(translator().translate_record(&Record::new("")), "");
        assert!(translator().feature_lines("  ").is_empty());
    }

    #[test]
    fn test_empty_blocks_are_skipped() {
        let t = translator();
        let records = vec![
            Record::new("salt").with_name("salt"),
            Record::new("<b></b>"),
            Record::new(" "),
            Record::new("pepper").with_name("pepper"),
        ];
        assert_eq!(
            t.translate_records(&records),
            "salt\tI1\tL4\tNoCAP\tNoPAREN\tB-NAME\n\
             \n\
             pepper\tI1\tL4\tNoCAP\tNoPAREN\tB-NAME\n"
        );
        assert_eq!(
            t.export_lines(["Salt", "", "<i></i>", "Pepper"]),
            "Salt\tI1\tL4\tYesCAP\tNoPAREN\n\
             \n\
             Pepper\tI1\tL4\tYesCAP\tNoPAREN\n"
        );
    }

    #[test]
    fn translator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Translator>();
        assert_send_sync::<Translator<IdentitySingularizer>>();
    }
}
