use serde::{Deserialize, Serialize};

use crate::error::TaggerError;

/// One labelled ingredient phrase.
///
/// Built from a [`RawRecord`] at the boundary: absent text fields become
/// empty strings and absent numbers become `0.0`, so downstream code never
/// has to check for missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    /// The free-text phrase, e.g. `"2 cups flour"`.
    pub input: String,

    /// Ingredient name, e.g. `"flour"`.
    pub name: String,

    /// Quantity, `0.0` when not recorded.
    #[serde(rename = "qty")]
    pub quantity: f64,

    /// Upper end of a quantity range ("2 to 3"), `0.0` when not recorded.
    pub range_end: f64,

    /// Unit, e.g. `"cup"`.
    pub unit: String,

    /// Free-text comment, e.g. `"finely chopped"`.
    pub comment: String,
}

impl Record {
    /// Creates a record with only the input phrase set.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            name: String::new(),
            quantity: 0.0,
            range_end: 0.0,
            unit: String::new(),
            comment: String::new(),
        }
    }

    /// Set the ingredient name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the range end.
    #[must_use]
    pub fn with_range_end(mut self, range_end: f64) -> Self {
        self.range_end = range_end;
        self
    }

    /// Set the comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Record shape as it arrives from tabular data, every column optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub qty: Option<f64>,
    #[serde(default)]
    pub range_end: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TryFrom<RawRecord> for Record {
    type Error = TaggerError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let input = raw.input.ok_or(TaggerError::MissingInput)?;
        Ok(Self {
            input,
            name: raw.name.unwrap_or_default(),
            quantity: raw.qty.unwrap_or(0.0),
            range_end: raw.range_end.unwrap_or(0.0),
            unit: raw.unit.unwrap_or_default(),
            comment: raw.comment.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_record_defaults_are_normalized() {
        let raw = RawRecord {
            input: Some("salt".into()),
            ..RawRecord::default()
        };
        let record = Record::try_from(raw).unwrap();
        assert_eq!(record, Record::new("salt"));
        assert_eq!(record.quantity, 0.0);
        assert_eq!(record.range_end, 0.0);
        assert!(record.name.is_empty());
    }

    #[test]
    fn missing_input_is_rejected() {
        let raw = RawRecord {
            name: Some("flour".into()),
            ..RawRecord::default()
        };
        assert!(matches!(
            Record::try_from(raw),
            Err(TaggerError::MissingInput)
        ));
    }

    #[test]
    fn record_serialization_uses_column_names() {
        let record = Record::new("2 cups flour")
            .with_name("flour")
            .with_unit("cup")
            .with_quantity(2.0);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["qty"], 2.0);
        assert_eq!(json["range_end"], 0.0);
        assert_eq!(json["unit"], "cup");
    }

    #[test]
    fn record_deserialization_goes_through_raw_record() {
        let record: Record =
            serde_json::from_str(r#"{"input": "1 egg", "qty": 1.0, "name": "egg"}"#).unwrap();
        assert_eq!(record.quantity, 1.0);
        assert_eq!(record.unit, "");

        let missing: Result<Record, _> = serde_json::from_str(r#"{"name": "egg"}"#);
        assert!(missing.is_err());
    }
}
