//! Display-oriented type inference
//!
//! Column types are guessed from the first row only. This is a fast hint for
//! picking an axis scale, not schema validation: later rows are never checked
//! and a heterogeneous column reports whatever its first value is.
//!
//! The same module holds the temporal string detection used when converting
//! JSON text into typed values.

use crate::data::dataset::{ColumnId, Dataset};
use crate::data::datavalue::DataValue;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::trace;

/// Static compiled regex patterns for temporal detection
/// Using LazyLock for thread-safe initialization
static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // YYYY-MM-DD (year must be 19xx or 20xx, month 01-12, day 01-31)
    Regex::new(r"^(19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap()
});

static LOCAL_DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD HH:MM:SS, optional fraction
    Regex::new(r"^(19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])[T ]\d{2}:\d{2}:\d{2}(\.\d+)?$")
        .unwrap()
});

static ZONED_DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ISO 8601 with timezone: YYYY-MM-DDTHH:MM:SS+/-HH:MM or Z
    Regex::new(
        r"^(19|20)\d{2}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])[T ]\d{2}:\d{2}:\d{2}(\.\d+)?(Z|z|[+-]\d{2}:\d{2})$",
    )
    .unwrap()
});

/// Type tag driving a renderer's axis/scale choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Number,
    String,
    DateTime,
    Date,
    /// Sampled value has no display type (booleans, missing values)
    Unknown,
    /// No row to sample
    Indeterminate,
}

impl ColumnType {
    /// Classify a single sampled value
    pub fn of(value: &DataValue) -> Self {
        match value {
            DataValue::Integer(_) | DataValue::Float(_) => ColumnType::Number,
            DataValue::String(_) => ColumnType::String,
            DataValue::DateTime(_) | DataValue::LocalDateTime(_) => ColumnType::DateTime,
            DataValue::Date(_) => ColumnType::Date,
            DataValue::Boolean(_) | DataValue::Null => ColumnType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::String => "string",
            ColumnType::DateTime => "datetime",
            ColumnType::Date => "date",
            ColumnType::Unknown => "unknown",
            ColumnType::Indeterminate => "indeterminate",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Temporal string detection
pub struct TypeInference;

impl TypeInference {
    /// Parse `value` as a zoned timestamp, local timestamp or date
    ///
    /// Uses strict regex patterns first to avoid false positives with ID
    /// strings like "BQ-123456" or "ORDER-2024-001", then lets chrono reject
    /// impossible calendar dates such as Feb 30.
    pub fn parse_temporal(value: &str) -> Option<DataValue> {
        // Quick length check - temporal values are 10-35 chars
        if value.len() < 10 || value.len() > 35 {
            return None;
        }

        if DATE_PATTERN.is_match(value) {
            return NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(DataValue::Date);
        }

        if ZONED_DATETIME_PATTERN.is_match(value) {
            let normalized = value.replacen(' ', "T", 1);
            return DateTime::parse_from_rfc3339(&normalized)
                .ok()
                .map(DataValue::DateTime);
        }

        if LOCAL_DATETIME_PATTERN.is_match(value) {
            let normalized = value.replacen(' ', "T", 1);
            return NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(DataValue::LocalDateTime);
        }

        None
    }

    pub fn looks_like_temporal(value: &str) -> bool {
        Self::parse_temporal(value).is_some()
    }
}

impl<'a> Dataset<'a> {
    /// Guess a column's display type from its value in the first row
    ///
    /// An empty dataset yields `ColumnType::Indeterminate`.
    pub fn guess_column_type(&self, column: impl Into<ColumnId>) -> Result<ColumnType> {
        let column = column.into();
        let Some(first) = self.rows().first() else {
            return Ok(ColumnType::Indeterminate);
        };

        let sample = self.value_fn(&column).get(first)?;
        let column_type = ColumnType::of(sample);
        trace!(target: "dataset", "Guessed type {} for column {}", column_type, column);
        Ok(column_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::row::Row;

    #[test]
    fn test_classify_values() {
        assert_eq!(ColumnType::of(&DataValue::Integer(1)), ColumnType::Number);
        assert_eq!(ColumnType::of(&DataValue::Float(1.5)), ColumnType::Number);
        assert_eq!(ColumnType::of(&DataValue::from("x")), ColumnType::String);
        assert_eq!(ColumnType::of(&DataValue::Boolean(true)), ColumnType::Unknown);
        assert_eq!(ColumnType::of(&DataValue::Null), ColumnType::Unknown);
    }

    #[test]
    fn test_column_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ColumnType::DateTime).unwrap(),
            "\"datetime\""
        );
        assert_eq!(ColumnType::Number.to_string(), "number");
    }

    #[test]
    fn test_temporal_detection() {
        assert_eq!(
            TypeInference::parse_temporal("2024-01-15"),
            Some(DataValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()))
        );
        assert!(matches!(
            TypeInference::parse_temporal("2024-01-15T10:30:00"),
            Some(DataValue::LocalDateTime(_))
        ));
        assert!(matches!(
            TypeInference::parse_temporal("2024-01-15 10:30:00.250"),
            Some(DataValue::LocalDateTime(_))
        ));
        assert!(matches!(
            TypeInference::parse_temporal("2024-01-15T10:30:00Z"),
            Some(DataValue::DateTime(_))
        ));
        assert!(matches!(
            TypeInference::parse_temporal("2024-01-15T10:30:00+05:30"),
            Some(DataValue::DateTime(_))
        ));
    }

    #[test]
    fn test_id_strings_not_detected_as_temporal() {
        for id in ["BQ-81198596", "ORDER-2024-001", "ID-123-456", "2024-ABC-123"] {
            assert!(
                !TypeInference::looks_like_temporal(id),
                "ID '{}' should not be detected as temporal",
                id
            );
        }
    }

    #[test]
    fn test_invalid_dates_not_detected() {
        assert_eq!(TypeInference::parse_temporal("2024-13-01"), None); // Month 13
        assert_eq!(TypeInference::parse_temporal("2024-01-32"), None); // Day 32
        assert_eq!(TypeInference::parse_temporal("2023-02-30"), None); // No Feb 30
    }

    #[test]
    fn test_guess_from_first_row_only() {
        let rows = vec![Row::positional([1]), Row::positional(["text"])];
        let ds = Dataset::new(&rows);
        assert_eq!(ds.guess_column_type(0usize), Ok(ColumnType::Number));
    }

    #[test]
    fn test_guess_on_empty_dataset() {
        let ds = Dataset::new(Vec::<Row>::new());
        assert_eq!(ds.guess_column_type("a"), Ok(ColumnType::Indeterminate));
    }
}
