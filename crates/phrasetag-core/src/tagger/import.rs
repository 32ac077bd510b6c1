//! # Tagger Output Import
//!
//! Reads the decoded output of the sequence-tagging engine back into
//! structured ingredients. The engine prints one token per line with the
//! predicted tag (and optionally its confidence) in the last column:
//!
//! ```text
//! # 0.511035
//! 1/2       I1  L12  NoCAP  X  B-QTY/0.982850
//! teaspoon  I2  L12  NoCAP  X  B-UNIT/0.982200
//! fresh     I3  L12  NoCAP  X  B-COMMENT/0.716364
//! thyme     I4  L12  NoCAP  X  B-NAME/0.816803
//! leaves    I5  L12  NoCAP  X  I-NAME/0.960524
//! ```
//!
//! Columns are tab-separated. A blank line ends an ingredient and lines
//! starting with `#` are headers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::tagger::inflect::Singularize;
use crate::tagger::tokenizer::unclump;

/// An ingredient reassembled from tagged tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedIngredient {
    /// Lower-case tag name to the tokens carrying it, smart-joined.
    pub fields: BTreeMap<String, String>,
    /// HTML rendering, one `<span>` per tag in first-seen order.
    pub display: String,
    /// The phrase reconstructed from all tokens.
    pub input: String,
}

#[derive(Default)]
struct Builder {
    fields: Vec<(String, Vec<String>)>,
    chunks: Vec<(String, Vec<String>)>,
}

impl Builder {
    fn push(&mut self, tag: String, token: String, field_token: String) {
        match self.chunks.last_mut() {
            Some((prev, tokens)) if *prev == tag => tokens.push(token),
            _ => self.chunks.push((tag.clone(), vec![token])),
        }
        match self.fields.iter_mut().find(|(name, _)| *name == tag) {
            Some((_, tokens)) => tokens.push(field_token),
            None => self.fields.push((tag, vec![field_token])),
        }
    }

    fn finish(self) -> Option<ImportedIngredient> {
        if self.chunks.is_empty() {
            return None;
        }
        let display = self
            .fields
            .iter()
            .map(|(tag, tokens)| format!("<span class=\"{tag}\">{}</span>", tokens.join(" ")))
            .collect();
        let input = smart_join(self.chunks.iter().map(|(_, tokens)| tokens.join(" ")));
        let fields = self
            .fields
            .into_iter()
            .map(|(tag, tokens)| (tag, smart_join(tokens)))
            .collect();
        Some(ImportedIngredient {
            fields,
            display,
            input,
        })
    }
}

/// Parses tagger output lines into ingredients.
///
/// Tokens tagged `unit` are singularized. Ingredients without any token
/// lines are dropped.
pub fn import_tagged_output<'a, S: Singularize>(
    lines: impl IntoIterator<Item = &'a str>,
    singularizer: &S,
) -> Vec<ImportedIngredient> {
    let mut ingredients = Vec::new();
    let mut current = Builder::default();

    for line in lines {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            ingredients.extend(std::mem::take(&mut current).finish());
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let columns: Vec<&str> = line.trim().split('\t').collect();
        let token = unclump(columns[0].trim());
        let last = columns.last().copied().unwrap_or_default();
        let tag = strip_prefix(last.split('/').next().unwrap_or_default()).to_lowercase();

        let field_token = if tag == "unit" {
            singularizer.singularize(&token)
        } else {
            token.clone()
        };
        current.push(tag, token, field_token);
    }
    ingredients.extend(current.finish());

    ingredients
}

fn strip_prefix(tag: &str) -> &str {
    tag.strip_prefix("B-")
        .or_else(|| tag.strip_prefix("I-"))
        .unwrap_or(tag)
}

/// Joins words with spaces without adding spaces before commas or inside
/// parentheses.
///
/// ```
/// use phrasetag_core::tagger::import::smart_join;
///
/// assert_eq!(smart_join(["salt", ",", "to", "taste"]), "salt, to taste");
/// assert_eq!(smart_join(["(", "optional", ")"]), "(optional)");
/// ```
pub fn smart_join<I, T>(words: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let joined = words
        .into_iter()
        .map(|w| w.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    joined
        .replace(" , ", ", ")
        .replace("( ", "(")
        .replace(" )", ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::inflect::EnglishSingularizer;

    const OUTPUT: &str = "# 0.511035\n\
        1/2\tI1\tL12\tNoCAP\tX\tB-QTY/0.982850\n\
        teaspoons\tI2\tL12\tNoCAP\tX\tB-UNIT/0.982200\n\
        fresh\tI3\tL12\tNoCAP\tX\tB-COMMENT/0.716364\n\
        thyme\tI4\tL12\tNoCAP\tX\tB-NAME/0.816803\n\
        leaves\tI5\tL12\tNoCAP\tX\tI-NAME/0.960524\n\
        ,\tI6\tL12\tNoCAP\tX\tB-COMMENT/0.772231\n\
        finely\tI7\tL12\tNoCAP\tX\tI-COMMENT/0.825956\n\
        chopped\tI8\tL12\tNoCAP\tX\tI-COMMENT/0.893379\n\
        \n\
        # 0.505999\n\
        Black\tI1\tL8\tYesCAP\tX\tB-NAME/0.765461\n\
        pepper\tI2\tL8\tNoCAP\tX\tI-NAME/0.756614\n\
        ,\tI3\tL8\tNoCAP\tX\tOTHER/0.798040\n\
        to\tI4\tL8\tNoCAP\tX\tB-COMMENT/0.683089\n\
        taste\tI5\tL8\tNoCAP\tX\tI-COMMENT/0.848617\n";

    #[test]
    fn test_import_two_ingredients() {
        let ingredients = import_tagged_output(OUTPUT.lines(), &EnglishSingularizer);
        assert_eq!(ingredients.len(), 2);

        let thyme = &ingredients[0];
        assert_eq!(thyme.fields["qty"], "1/2");
        assert_eq!(thyme.fields["unit"], "teaspoon");
        assert_eq!(thyme.fields["name"], "thyme leaves");
        assert_eq!(thyme.fields["comment"], "fresh, finely chopped");
        assert_eq!(
            thyme.input,
            "1/2 teaspoons fresh thyme leaves, finely chopped"
        );
        assert_eq!(
            thyme.display,
            "<span class=\"qty\">1/2</span>\
             <span class=\"unit\">teaspoon</span>\
             <span class=\"comment\">fresh , finely chopped</span>\
             <span class=\"name\">thyme leaves</span>"
        );

        let pepper = &ingredients[1];
        assert_eq!(pepper.fields["name"], "Black pepper");
        assert_eq!(pepper.fields["other"], ",");
        assert_eq!(pepper.input, "Black pepper, to taste");
    }

    #[test]
    fn test_import_unclumps_and_accepts_missing_confidence() {
        let lines = ["1$1/2\tI1\tL4\tNoCAP\tNoPAREN\tB-QTY", "cups\tI2\tL4\tNoCAP\tNoPAREN\tB-UNIT"];
        let ingredients = import_tagged_output(lines, &EnglishSingularizer);
        assert_eq!(ingredients.len(), 1);
        assert_eq!(ingredients[0].fields["qty"], "1 1/2");
        assert_eq!(ingredients[0].fields["unit"], "cup");
    }

    #[test]
    fn test_import_skips_empty_ingredients() {
        let ingredients = import_tagged_output(["", "# 0.5", "", ""], &EnglishSingularizer);
        assert!(ingredients.is_empty());
    }

    #[test]
    fn test_smart_join() {
        assert_eq!(smart_join(["1", "cup", "(", "about", "20", ")"]), "1 cup (about 20)");
        assert_eq!(smart_join(Vec::<String>::new()), "");
    }
}
