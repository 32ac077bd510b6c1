pub mod align;
pub mod bio_tags;
pub mod features;
pub mod import;
pub mod inflect;
pub mod number;
pub mod tokenizer;
pub mod translator;

pub use align::LabelAligner;
pub use bio_tags::{add_prefixes, best_tag, BioTag, BioTagger, CandidateTags, Field, UnknownTag};
pub use features::{features, TokenFeatures};
pub use import::{import_tagged_output, smart_join, ImportedIngredient};
pub use inflect::{EnglishSingularizer, IdentitySingularizer, Singularize};
pub use number::{round2, NumberNormalizer};
pub use tokenizer::{clean_unicode_fractions, unclump, Tokenizer};
pub use translator::{TaggedToken, Translator};
