//! Dataset: one row collection, many row shapes
//!
//! Rows arrive either as keyed records or as positional sequences, the latter
//! optionally labelled by an external header list. The shape is captured once
//! from the first row and every lookup goes through a [`ColumnResolver`] for
//! that shape, so callers can address "the column called X" uniformly.

use crate::data::datavalue::DataValue;
use crate::data::row::{Locator, Row};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// How a caller names a column: by label/key or by position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnId {
    Name(String),
    Index(usize),
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnId::Name(name) => write!(f, "{}", name),
            ColumnId::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for ColumnId {
    fn from(name: &str) -> Self {
        ColumnId::Name(name.to_string())
    }
}

impl From<String> for ColumnId {
    fn from(name: String) -> Self {
        ColumnId::Name(name)
    }
}

impl From<&String> for ColumnId {
    fn from(name: &String) -> Self {
        ColumnId::Name(name.clone())
    }
}

impl From<usize> for ColumnId {
    fn from(index: usize) -> Self {
        ColumnId::Index(index)
    }
}

impl From<&ColumnId> for ColumnId {
    fn from(column: &ColumnId) -> Self {
        column.clone()
    }
}

impl From<Locator> for ColumnId {
    fn from(locator: Locator) -> Self {
        match locator {
            Locator::Key(key) => ColumnId::Name(key),
            Locator::Position(pos) => ColumnId::Index(pos),
        }
    }
}

/// Row shape detected from the first row at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowShape {
    Empty,
    Keyed,
    Positional { width: usize },
}

/// Per-shape column resolution strategy
pub(crate) trait ColumnResolver {
    /// Identifiers usable to address every column
    fn names(&self) -> Vec<ColumnId>;

    /// Map a caller-facing identifier onto a raw-row locator
    fn resolve(&self, column: &ColumnId) -> Option<Locator>;

    /// Map a key or position back onto its caller-facing identifier
    fn label(&self, column: ColumnId) -> ColumnId;
}

struct NoColumns;

impl ColumnResolver for NoColumns {
    fn names(&self) -> Vec<ColumnId> {
        Vec::new()
    }

    fn resolve(&self, _column: &ColumnId) -> Option<Locator> {
        None
    }

    fn label(&self, column: ColumnId) -> ColumnId {
        column
    }
}

struct KeyedColumns<'d> {
    first: &'d BTreeMap<String, DataValue>,
}

impl ColumnResolver for KeyedColumns<'_> {
    fn names(&self) -> Vec<ColumnId> {
        self.first.keys().cloned().map(ColumnId::Name).collect()
    }

    fn resolve(&self, column: &ColumnId) -> Option<Locator> {
        match column {
            ColumnId::Name(name) if self.first.contains_key(name) => {
                Some(Locator::Key(name.clone()))
            }
            _ => None,
        }
    }

    fn label(&self, column: ColumnId) -> ColumnId {
        column
    }
}

struct PositionalColumns<'d> {
    width: usize,
    headers: Option<&'d [String]>,
}

impl ColumnResolver for PositionalColumns<'_> {
    fn names(&self) -> Vec<ColumnId> {
        match self.headers {
            Some(headers) => headers.iter().cloned().map(ColumnId::Name).collect(),
            None => (0..self.width).map(ColumnId::Index).collect(),
        }
    }

    fn resolve(&self, column: &ColumnId) -> Option<Locator> {
        match column {
            ColumnId::Name(name) => self
                .headers?
                .iter()
                .position(|h| h == name)
                .map(Locator::Position),
            ColumnId::Index(index) if *index < self.width => Some(Locator::Position(*index)),
            ColumnId::Index(_) => None,
        }
    }

    fn label(&self, column: ColumnId) -> ColumnId {
        match (self.headers, column) {
            (Some(headers), ColumnId::Index(index)) => match headers.get(index) {
                Some(header) => ColumnId::Name(header.clone()),
                None => ColumnId::Index(index),
            },
            (_, column) => column,
        }
    }
}

/// An immutable row collection with optional positional headers
#[derive(Debug, Clone)]
pub struct Dataset<'a> {
    rows: Cow<'a, [Row]>,
    headers: Option<Cow<'a, [String]>>,
    shape: RowShape,
}

impl<'a> Dataset<'a> {
    /// Wrap rows without headers
    pub fn new(rows: impl Into<Cow<'a, [Row]>>) -> Self {
        Self::build(rows.into(), None)
    }

    /// Wrap positional rows together with their column labels
    pub fn with_headers(
        rows: impl Into<Cow<'a, [Row]>>,
        headers: impl Into<Cow<'a, [String]>>,
    ) -> Self {
        Self::build(rows.into(), Some(headers.into()))
    }

    pub(crate) fn build(rows: Cow<'a, [Row]>, headers: Option<Cow<'a, [String]>>) -> Self {
        let shape = match rows.first() {
            None => RowShape::Empty,
            Some(Row::Keyed(_)) => RowShape::Keyed,
            Some(Row::Positional(values)) => RowShape::Positional {
                width: values.len(),
            },
        };

        if shape == RowShape::Keyed && headers.is_some() {
            debug!(target: "dataset", "Ignoring headers supplied with keyed rows");
        }
        debug!(
            target: "dataset",
            "Created dataset: {} rows, shape {:?}, headers: {}",
            rows.len(),
            shape,
            headers.is_some()
        );

        Self {
            rows,
            headers,
            shape,
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Headers as supplied at construction, whatever the row shape
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Whether positional rows are addressed through headers
    pub fn has_headers(&self) -> bool {
        matches!(self.shape, RowShape::Positional { .. }) && self.headers.is_some()
    }

    pub fn shape(&self) -> RowShape {
        self.shape
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns in the first row
    pub fn width(&self) -> usize {
        self.rows.first().map(Row::len).unwrap_or(0)
    }

    pub(crate) fn resolver(&self) -> Box<dyn ColumnResolver + '_> {
        match (self.shape, self.rows.first()) {
            (RowShape::Keyed, Some(Row::Keyed(first))) => Box::new(KeyedColumns { first }),
            (RowShape::Positional { width }, _) => Box::new(PositionalColumns {
                width,
                headers: self.headers.as_deref(),
            }),
            _ => Box::new(NoColumns),
        }
    }

    /// Identifiers usable to address every column of this dataset
    ///
    /// Keyed rows yield the keys of the first row (in key order), headered
    /// positional rows yield the headers, headerless ones yield `0..width`.
    pub fn column_names(&self) -> Vec<ColumnId> {
        self.resolver().names()
    }

    /// Resolve a column identifier to the key or position used on a raw row
    ///
    /// Returns `None` when the column does not exist. Names never resolve on
    /// a headerless positional dataset.
    pub fn column_index(&self, column: impl Into<ColumnId>) -> Option<Locator> {
        self.resolver().resolve(&column.into())
    }

    /// Inverse of [`Dataset::column_index`]
    ///
    /// A position on a headered dataset maps to its header label; an
    /// out-of-range position is echoed back unchanged.
    pub fn column_name(&self, column: impl Into<ColumnId>) -> ColumnId {
        self.resolver().label(column.into())
    }
}
