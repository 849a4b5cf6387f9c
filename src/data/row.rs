use crate::data::datavalue::DataValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Shared missing-value sentinel handed out by reads that find nothing
pub(crate) static MISSING: DataValue = DataValue::Null;

/// A row of data, either a keyed record or a fixed-width positional sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Row {
    Keyed(BTreeMap<String, DataValue>),
    Positional(Vec<DataValue>),
}

impl Row {
    /// Build a keyed row from `(key, value)` pairs
    pub fn keyed<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<DataValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Row::Keyed(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a positional row from values in column order
    pub fn positional<V, I>(values: I) -> Self
    where
        V: Into<DataValue>,
        I: IntoIterator<Item = V>,
    {
        Row::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Row::Keyed(_))
    }

    /// Number of values (keys for keyed rows) in this row
    pub fn len(&self) -> usize {
        match self {
            Row::Keyed(map) => map.len(),
            Row::Positional(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Direct access by key or position, `None` if absent
    pub fn get(&self, locator: &Locator) -> Option<&DataValue> {
        match (self, locator) {
            (Row::Keyed(map), Locator::Key(key)) => map.get(key),
            (Row::Positional(values), Locator::Position(pos)) => values.get(*pos),
            _ => None,
        }
    }

    /// Like [`Row::get`] but a missing value reads as `DataValue::Null`
    pub fn read(&self, locator: &Locator) -> &DataValue {
        self.get(locator).unwrap_or(&MISSING)
    }
}

/// Where a column lives on a raw row once it has been resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locator {
    Key(String),
    Position(usize),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Key(key) => write!(f, "{}", key),
            Locator::Position(pos) => write!(f, "{}", pos),
        }
    }
}
