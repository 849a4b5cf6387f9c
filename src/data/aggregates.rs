//! Column aggregations used to drive axis scales and legends
//!
//! All of these scan the rows once through a column accessor and never copy
//! the row collection.

use crate::data::accessor::ColumnAccessor;
use crate::data::dataset::{ColumnId, Dataset};
use crate::data::datavalue::DataValue;
use crate::data::datavalue_compare::{compare_orderable, is_orderable};
use crate::data::type_inference::ColumnType;
use crate::error::{DatasetError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// Minimum and maximum observed over a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: DataValue,
    pub max: DataValue,
}

impl Extent {
    pub fn new(min: impl Into<DataValue>, max: impl Into<DataValue>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }
}

/// Everything a legend or axis needs to know about one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: ColumnId,
    pub label: ColumnId,
    pub column_type: ColumnType,
    /// `None` when the column is empty or not orderable
    pub extent: Option<Extent>,
    pub unique_count: usize,
    pub null_count: usize,
}

/// Running min/max over borrowed values
#[derive(Default)]
struct ExtentTracker<'v> {
    bounds: Option<(&'v DataValue, &'v DataValue)>,
}

impl<'v> ExtentTracker<'v> {
    fn observe(&mut self, value: &'v DataValue) -> Result<()> {
        self.bounds = Some(match self.bounds {
            None => {
                if !is_orderable(value) {
                    return Err(DatasetError::type_mismatch("orderable value", value.kind()));
                }
                (value, value)
            }
            Some((min, max)) => {
                let min = if compare_orderable(value, min)?.is_lt() {
                    value
                } else {
                    min
                };
                let max = if compare_orderable(value, max)?.is_gt() {
                    value
                } else {
                    max
                };
                (min, max)
            }
        });
        Ok(())
    }

    fn finish(self) -> Option<Extent> {
        self.bounds.map(|(min, max)| Extent {
            min: min.clone(),
            max: max.clone(),
        })
    }
}

/// Per-row sum; stays integral until a float or an overflow shows up
#[derive(Debug, Clone, Copy)]
enum RowSum {
    Integer(i64),
    Float(f64),
}

impl RowSum {
    fn add(self, value: &DataValue) -> Result<RowSum> {
        Ok(match (self, value) {
            (RowSum::Integer(acc), DataValue::Integer(i)) => match acc.checked_add(*i) {
                Some(sum) => RowSum::Integer(sum),
                None => RowSum::Float(acc as f64 + *i as f64),
            },
            (RowSum::Integer(acc), DataValue::Float(f)) => RowSum::Float(acc as f64 + f),
            (RowSum::Float(acc), DataValue::Integer(i)) => RowSum::Float(acc + *i as f64),
            (RowSum::Float(acc), DataValue::Float(f)) => RowSum::Float(acc + f),
            (_, other) => return Err(DatasetError::type_mismatch("number", other.kind())),
        })
    }

    fn into_value(self) -> DataValue {
        match self {
            RowSum::Integer(i) => DataValue::Integer(i),
            RowSum::Float(f) => DataValue::Float(f),
        }
    }
}

/// Hash/equality wrapper so values can be deduplicated
///
/// Floats compare by bit pattern, which keeps `Eq` lawful and lets `NaN`
/// deduplicate.
struct ValueKey<'v>(&'v DataValue);

impl PartialEq for ValueKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (DataValue::Float(a), DataValue::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a == b,
        }
    }
}

impl Eq for ValueKey<'_> {}

impl Hash for ValueKey<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self.0).hash(state);
        match self.0 {
            DataValue::String(s) => s.hash(state),
            DataValue::Integer(i) => i.hash(state),
            DataValue::Float(f) => f.to_bits().hash(state),
            DataValue::Boolean(b) => b.hash(state),
            DataValue::DateTime(dt) => dt.hash(state),
            DataValue::LocalDateTime(dt) => dt.hash(state),
            DataValue::Date(d) => d.hash(state),
            DataValue::Null => {}
        }
    }
}

impl<'a> Dataset<'a> {
    /// `{min, max}` of one column in a single pass
    ///
    /// Missing values are skipped. Returns `None` when nothing was observed
    /// and fails with `TypeMismatch` on booleans or mixed kinds.
    pub fn column_extents(&self, column: impl Into<ColumnId>) -> Result<Option<Extent>> {
        let accessor = self.value_fn(column);
        let mut tracker = ExtentTracker::default();

        for row in self.rows() {
            let value = accessor.get(row)?;
            if !value.is_null() {
                tracker.observe(value)?;
            }
        }

        let extent = tracker.finish();
        debug!(target: "dataset", "Extent of column {}: {:?}", accessor.column(), extent);
        Ok(extent)
    }

    /// `{min, max}` of the per-row sum over several columns
    ///
    /// Used for stacked encodings where the rendered extent depends on the
    /// total of several series.
    pub fn combined_column_extents<I, C>(&self, columns: I) -> Result<Option<Extent>>
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnId>,
    {
        let columns: Vec<ColumnId> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(DatasetError::invalid_input(
                "combined extents need at least one column",
            ));
        }
        if self.is_empty() {
            return Ok(None);
        }

        let accessors = columns
            .iter()
            .map(|column| match self.column_index(column) {
                Some(_) => Ok(self.value_fn(column)),
                None => Err(DatasetError::unresolved(column)),
            })
            .collect::<Result<Vec<ColumnAccessor>>>()?;

        let mut min: Option<DataValue> = None;
        let mut max: Option<DataValue> = None;

        for row in self.rows() {
            let mut sum = RowSum::Integer(0);
            for accessor in &accessors {
                sum = sum.add(accessor.get(row)?)?;
            }
            let sum = sum.into_value();

            if min
                .as_ref()
                .map_or(Ok(true), |m| compare_orderable(&sum, m).map(|o| o.is_lt()))?
            {
                min = Some(sum.clone());
            }
            if max
                .as_ref()
                .map_or(Ok(true), |m| compare_orderable(&sum, m).map(|o| o.is_gt()))?
            {
                max = Some(sum);
            }
        }

        debug!(
            target: "dataset",
            "Combined extent of {} columns: {:?}..{:?}",
            columns.len(),
            min,
            max
        );
        Ok(min.zip(max).map(|(min, max)| Extent { min, max }))
    }

    /// Distinct values of a column in first-occurrence order
    pub fn unique_values(&self, column: impl Into<ColumnId>) -> Result<Vec<DataValue>> {
        let accessor = self.value_fn(column);
        let mut seen = HashSet::new();
        let mut unique = Vec::new();

        for row in self.rows() {
            let value = accessor.get(row)?;
            if seen.insert(ValueKey(value)) {
                unique.push(value.clone());
            }
        }

        Ok(unique)
    }

    /// Type, extent and cardinality of one column
    ///
    /// A column that cannot be ordered reports no extent instead of failing.
    pub fn describe_column(&self, column: impl Into<ColumnId>) -> Result<ColumnSummary> {
        let column = column.into();
        let column_type = self.guess_column_type(&column)?;
        let extent = match self.column_extents(&column) {
            Ok(extent) => extent,
            Err(DatasetError::TypeMismatch { .. }) => None,
            Err(e) => return Err(e),
        };
        let unique_count = self.unique_values(&column)?.len();
        let mut null_count = 0;
        for value in self.column_values(&column) {
            if value?.is_null() {
                null_count += 1;
            }
        }
        let label = match self.column_index(&column) {
            Some(locator) => self.column_name(locator),
            None => column.clone(),
        };

        Ok(ColumnSummary {
            column,
            label,
            column_type,
            extent,
            unique_count,
            null_count,
        })
    }
}
