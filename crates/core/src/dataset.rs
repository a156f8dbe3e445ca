//! Static datasets served to Grafana template variables.
//!
//! The dataset file is a JSON object whose keys are dataset names. Each value is
//! either an array of scalars (list form) or an object mapping key to scalar
//! (keyed form). The shape is fixed here, at load time, so resolution never has
//! to probe it.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::DatasetError;

/// A single dataset entry. Nulls and nested structures are rejected on load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// Text form the contains filter is matched against.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::String(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(number_text(n)),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s)),
            Value::Number(n) => Some(Self::Number(n)),
            Value::Bool(b) => Some(Self::Bool(b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Renders a JSON number the way JavaScript's `toString` does for the common
/// cases: whole floats lose their fraction (`1.0` is `"1"`).
pub fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 { "0".to_owned() } else { format!("{f:.0}") }
        },
        _ => n.to_string(),
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

/// Key to scalar mapping that keeps the key order of the source file.
/// A repeated key keeps its first position and takes the last value.
pub type KeyedValues = IndexMap<String, Scalar>;

/// One named dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetValue {
    List(Vec<Scalar>),
    Keyed(KeyedValues),
}

impl DatasetValue {
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Keyed(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn shape(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Keyed(_) => "keyed",
        }
    }

    fn from_json(name: &str, value: Value) -> Result<Self, DatasetError> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    Scalar::from_json(item).ok_or_else(|| invalid(name, format!("element {i} is not a scalar")))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(map) => {
                let mut keyed = KeyedValues::with_capacity(map.len());
                for (key, item) in map {
                    let scalar = Scalar::from_json(item)
                        .ok_or_else(|| invalid(name, format!("value for key {key:?} is not a scalar")))?;
                    keyed.insert(key, scalar);
                }
                Ok(Self::Keyed(keyed))
            },
            _ => Err(invalid(name, "must be an array or an object".to_owned())),
        }
    }
}

fn invalid(name: &str, detail: String) -> DatasetError {
    DatasetError::InvalidValue { dataset: name.to_owned(), detail }
}

/// All datasets, keyed by name. Built once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetCollection {
    datasets: HashMap<String, DatasetValue>,
}

impl DatasetCollection {
    /// Reads and validates the dataset file at `path`.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| DatasetError::Io { path: path.to_path_buf(), source })?;
        let collection = Self::from_json_str(&raw)?;
        tracing::debug!(path = %path.display(), datasets = collection.len(), "loaded dataset file");
        Ok(collection)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, DatasetError> {
        Self::from_value(serde_json::from_str(raw)?)
    }

    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let Value::Object(map) = value else {
            return Err(DatasetError::NotAnObject);
        };
        Self::from_map(map)
    }

    fn from_map(map: Map<String, Value>) -> Result<Self, DatasetError> {
        let mut datasets = HashMap::with_capacity(map.len());
        for (name, value) in map {
            let dataset = DatasetValue::from_json(&name, value)?;
            datasets.insert(name, dataset);
        }
        Ok(Self { datasets })
    }

    pub fn insert(&mut self, name: impl Into<String>, dataset: DatasetValue) {
        self.datasets.insert(name.into(), dataset);
    }

    pub fn get(&self, name: &str) -> Option<&DatasetValue> {
        self.datasets.get(name)
    }

    /// Dataset names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.datasets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
