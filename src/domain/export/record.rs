// ============================================================
// TIME SERIES RECORDS
// ============================================================
// Chart points as delivered by the backend, key order preserved

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Scalar;
use crate::domain::error::AppError;

/// One chart point: field name -> value, in first-seen key order.
///
/// Field sets may differ between records of the same series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeriesRecord(Map<String, Value>);

impl TimeSeriesRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, keeps insertion order
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<Scalar> {
        self.0.get(field).map(Scalar::from)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for TimeSeriesRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for TimeSeriesRecord {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::ParseError(format!(
                "Chart record must be a JSON object, got: {}",
                other
            ))),
        }
    }
}

/// A named, chronologically ordered sequence of records.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedSeries {
    pub name: String,
    pub records: Vec<TimeSeriesRecord>,
}

impl NamedSeries {
    pub fn new(name: impl Into<String>, records: Vec<TimeSeriesRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
