pub mod record;

pub use record::{RawRecord, Record};
