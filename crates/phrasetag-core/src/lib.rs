//! # Phrasetag Core
//!
//! Builds training corpora for a sequence tagger that labels the parts of
//! ingredient phrases. Each labelled record carries the original phrase
//! plus its separately recorded fields; the tagger aligns phrase tokens to
//! those fields and emits one BIO-tagged feature line per token.
//!
//! ## Quick Start
//!
//! ```rust
//! use phrasetag_core::{Record, Translator};
//!
//! let translator = Translator::new().unwrap();
//! let record = Record::new("2 cups flour")
//!     .with_name("flour")
//!     .with_unit("cup")
//!     .with_quantity(2.0);
//!
//! assert_eq!(
//!     translator.translate_record(&record),
//!     "2\tI1\tL4\tNoCAP\tNoPAREN\tB-QTY\n\
//!      cups\tI2\tL4\tNoCAP\tNoPAREN\tB-UNIT\n\
//!      flour\tI3\tL4\tNoCAP\tNoPAREN\tB-NAME\n"
//! );
//! ```
pub mod error;
pub mod partition;
pub mod tagger;
pub mod types;

// Re-export primary API
pub use error::{Result, TaggerError};
pub use partition::{split, DatasetSplit, PartitionConfig};
pub use tagger::{
    import_tagged_output, BioTag, EnglishSingularizer, Field, IdentitySingularizer,
    ImportedIngredient, Singularize, TaggedToken, Tokenizer, Translator,
};
pub use types::{RawRecord, Record};
