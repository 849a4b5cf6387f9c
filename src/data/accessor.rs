//! Column accessors
//!
//! An accessor is resolved once against a dataset and then applied to every
//! row. Resolution failures are deferred: building an accessor for a column
//! that does not exist succeeds, invoking it fails.

use crate::data::dataset::{ColumnId, Dataset, RowShape};
use crate::data::datavalue::DataValue;
use crate::data::row::{Locator, Row};
use crate::error::{DatasetError, Result};

/// Reusable reader for one column of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAccessor {
    column: ColumnId,
    locator: Option<Locator>,
}

impl ColumnAccessor {
    /// The identifier this accessor was built for
    pub fn column(&self) -> &ColumnId {
        &self.column
    }

    pub fn locator(&self) -> Option<&Locator> {
        self.locator.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.locator.is_some()
    }

    /// Read this column from `row`
    ///
    /// A row that lacks the key or position reads as `DataValue::Null`.
    pub fn get<'r>(&self, row: &'r Row) -> Result<&'r DataValue> {
        match &self.locator {
            Some(locator) => Ok(row.read(locator)),
            None => Err(DatasetError::unresolved(&self.column)),
        }
    }

    /// Turn the accessor into a plain closure
    pub fn into_fn(self) -> impl Fn(&Row) -> Result<&DataValue> + Clone + Send + Sync {
        move |row| self.get(row)
    }
}

impl<'a> Dataset<'a> {
    /// Build an accessor for `column`
    ///
    /// Keyed rows read the key directly, even if the first row lacks it.
    /// Headered positional rows resolve the label (or index) once, so an
    /// unknown label or an index past the header width fails on use.
    /// Headerless positional rows take the index as-is: an index past the
    /// row width reads as `DataValue::Null` on every row.
    pub fn value_fn(&self, column: impl Into<ColumnId>) -> ColumnAccessor {
        let column = column.into();
        let locator = match (self.shape(), &column) {
            (RowShape::Keyed, ColumnId::Name(key)) => Some(Locator::Key(key.clone())),
            (RowShape::Keyed, ColumnId::Index(_)) => None,
            (RowShape::Positional { .. }, ColumnId::Name(_)) => self.column_index(&column),
            (RowShape::Positional { .. }, ColumnId::Index(_)) if self.has_headers() => {
                self.column_index(&column)
            }
            (RowShape::Positional { .. } | RowShape::Empty, ColumnId::Index(index)) => {
                Some(Locator::Position(*index))
            }
            (RowShape::Empty, ColumnId::Name(name)) => Some(Locator::Key(name.clone())),
        };

        ColumnAccessor { column, locator }
    }

    /// Iterate over one column's values, row by row
    pub fn column_values(
        &self,
        column: impl Into<ColumnId>,
    ) -> impl Iterator<Item = Result<&DataValue>> + '_ {
        let accessor = self.value_fn(column);
        self.rows().iter().map(move |row| accessor.get(row))
    }
}
