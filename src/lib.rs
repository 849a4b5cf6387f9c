//! Uniform access to tabular rows for chart rendering.
//!
//! A [`Dataset`] wraps rows that are either keyed records or positional
//! tuples (optionally labelled by headers) and lets callers enumerate and
//! resolve columns, build reusable [`ColumnAccessor`]s, guess display types
//! and compute extents and distinct values without caring about row shape.
//!
//! ```
//! use chart_data::{Dataset, DataValue, Extent, Row};
//!
//! let rows = vec![Row::positional([1, 4]), Row::positional([4, 6]), Row::positional([-3, -1])];
//! let headers = vec!["a".to_string(), "b".to_string()];
//! let ds = Dataset::with_headers(&rows, &headers);
//!
//! assert_eq!(ds.column_extents("a").unwrap(), Some(Extent::new(-3, 4)));
//! assert_eq!(ds.combined_column_extents(["a", "b"]).unwrap(), Some(Extent::new(-4, 10)));
//! assert_eq!(ds.value_fn("b").get(&rows[1]).unwrap(), &DataValue::Integer(6));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod utils;

pub use data::accessor::ColumnAccessor;
pub use data::aggregates::{ColumnSummary, Extent};
pub use data::dataset::{ColumnId, Dataset, RowShape};
pub use data::datavalue::DataValue;
pub use data::json::JsonConverter;
pub use data::row::{Locator, Row};
pub use data::type_inference::ColumnType;
pub use error::{DatasetError, Result};
