//! Building datasets from JSON
//!
//! Objects become keyed rows and arrays become positional rows. This is the
//! dynamic construction path, so it is the one place where the row or header
//! container can turn out not to be a sequence at all.

use crate::config::ConversionConfig;
use crate::data::dataset::Dataset;
use crate::data::datavalue::DataValue;
use crate::data::row::Row;
use crate::data::type_inference::TypeInference;
use crate::error::{DatasetError, Result};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use tracing::debug;

/// Converts JSON values into rows and cells
#[derive(Debug, Clone, Default)]
pub struct JsonConverter {
    config: ConversionConfig,
}

impl JsonConverter {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Convert a scalar (or nested structure) into a cell value
    pub fn to_data_value(&self, json: &JsonValue) -> DataValue {
        match json {
            JsonValue::Null => DataValue::Null,
            JsonValue::Bool(b) => DataValue::Boolean(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DataValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    DataValue::Float(f)
                } else {
                    // Only reachable when serde_json's arbitrary_precision
                    // feature is unified in by another crate
                    DataValue::String(n.to_string())
                }
            }
            JsonValue::String(s) => {
                if self.config.detect_temporal_strings {
                    if let Some(temporal) = TypeInference::parse_temporal(s) {
                        return temporal;
                    }
                }
                DataValue::String(s.clone())
            }
            JsonValue::Array(_) | JsonValue::Object(_) => {
                // Store complex types as JSON string
                DataValue::String(json.to_string())
            }
        }
    }

    /// Convert one JSON row; objects are keyed, arrays positional
    pub fn to_row(&self, json: &JsonValue) -> Result<Row> {
        match json {
            JsonValue::Object(obj) => Ok(Row::Keyed(
                obj.iter()
                    .map(|(k, v)| (k.clone(), self.to_data_value(v)))
                    .collect(),
            )),
            JsonValue::Array(values) => Ok(Row::Positional(
                values.iter().map(|v| self.to_data_value(v)).collect(),
            )),
            other => Err(DatasetError::invalid_input(format!(
                "row must be an object or an array, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Build a dataset from a JSON array of rows and optional header array
    pub fn to_dataset(
        &self,
        data: &JsonValue,
        headers: Option<&JsonValue>,
    ) -> Result<Dataset<'static>> {
        let JsonValue::Array(items) = data else {
            return Err(DatasetError::invalid_input(format!(
                "rows must be an array, got {}",
                json_kind(data)
            )));
        };

        let headers = headers.map(parse_headers).transpose()?;
        let rows = items
            .iter()
            .map(|item| self.to_row(item))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            target: "dataset",
            "Converted {} JSON rows (temporal detection: {})",
            rows.len(),
            self.config.detect_temporal_strings
        );
        Ok(Dataset::build(Cow::Owned(rows), headers.map(Cow::Owned)))
    }
}

fn parse_headers(headers: &JsonValue) -> Result<Vec<String>> {
    let JsonValue::Array(labels) = headers else {
        return Err(DatasetError::invalid_input(format!(
            "headers must be an array, got {}",
            json_kind(headers)
        )));
    };

    labels
        .iter()
        .map(|label| match label {
            JsonValue::String(s) => Ok(s.clone()),
            other => Err(DatasetError::invalid_input(format!(
                "header labels must be strings, got {}",
                json_kind(other)
            ))),
        })
        .collect()
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl Dataset<'static> {
    /// Build a dataset from JSON with the default conversion settings
    pub fn from_json(data: &JsonValue, headers: Option<&JsonValue>) -> Result<Self> {
        JsonConverter::default().to_dataset(data, headers)
    }
}
