//! # Word Singularization
//!
//! Alignment compares tokens in singular form so that `"cups"` in a phrase
//! matches a unit recorded as `"cup"`. The capability sits behind the
//! [`Singularize`] trait so callers can swap in a full inflection library or
//! stub it out in tests.

/// Turns a word into its singular form.
pub trait Singularize {
    /// Returns the singular form of `word`. Words that are not plural, or
    /// that are not words at all, come back unchanged.
    fn singularize(&self, word: &str) -> String;
}

/// Leaves every word untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySingularizer;

impl Singularize for IdentitySingularizer {
    fn singularize(&self, word: &str) -> String {
        word.to_string()
    }
}

/// Rule-based English singularizer tuned for ingredient vocabulary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishSingularizer;

/// Plurals that suffix rules get wrong.
const IRREGULAR: &[(&str, &str)] = &[
    ("leaves", "leaf"),
    ("halves", "half"),
    ("loaves", "loaf"),
    ("knives", "knife"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
    ("mangoes", "mango"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("feet", "foot"),
];

/// Words ending in `s` that are already singular.
const UNCOUNTABLE: &[&str] = &[
    "molasses",
    "asparagus",
    "couscous",
    "hummus",
    "swiss",
    "series",
    "species",
    "grits",
    "brussels",
    "citrus",
    "octopus",
    "hibiscus",
];

/// `-es` endings where the whole `es` is the plural suffix.
const ES_SUFFIXES: &[&str] = &["ches", "shes", "sses", "xes", "zzes"];

impl Singularize for EnglishSingularizer {
    fn singularize(&self, word: &str) -> String {
        if word.chars().count() <= 2 || !word.chars().any(char::is_alphabetic) {
            return word.to_string();
        }

        let lower = word.to_lowercase();
        if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == lower) {
            return match_case(word, singular);
        }
        if UNCOUNTABLE.contains(&lower.as_str()) {
            return word.to_string();
        }

        if lower.len() > 4 && lower.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if ES_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
            return word[..word.len() - 2].to_string();
        }
        if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
            return word.to_string();
        }
        match word.strip_suffix(['s', 'S']) {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        }
    }
}

/// Carries a leading capital over from `original` to `replacement`.
fn match_case(original: &str, replacement: &str) -> String {
    let capitalized = original.chars().next().is_some_and(char::is_uppercase);
    if !capitalized {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
