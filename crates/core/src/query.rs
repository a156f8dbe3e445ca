//! Parsing of the JSON-encoded `target` carried by a `/search` request.

use serde_json::{Map, Value};

use crate::dataset::number_text;
use crate::error::ResolveError;

/// A structured search query, e.g. `{"data": "hosts", "contains": "web", "id": "(h1|h2)"}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Name of the dataset to read from.
    pub data: String,
    /// Lowercased substring filter. `None` disables filtering.
    pub contains: Option<String>,
    /// Key selection for keyed datasets.
    pub id: Option<IdSelection>,
}

impl Query {
    /// Parses a target string. The caller has already checked the `{` prefix.
    pub fn parse(target: &str) -> Result<Self, ResolveError> {
        let value: Value = serde_json::from_str(target)?;
        let Value::Object(fields) = value else {
            return Err(ResolveError::InvalidQueryShape);
        };
        Self::from_fields(&fields)
    }

    fn from_fields(fields: &Map<String, Value>) -> Result<Self, ResolveError> {
        let data = match fields.get("data") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(ResolveError::MissingOrInvalidField("data")),
        };
        let id = match fields.get("id") {
            Some(Value::String(raw)) if !raw.is_empty() => Some(IdSelection::parse(raw)),
            _ => None,
        };
        Ok(Self { data, contains: contains_filter(fields.get("contains")), id })
    }
}

/// Falsy values (`""`, `0`, `false`, `null`) mean "no filter". An empty string
/// would match everything anyway.
fn contains_filter(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.to_lowercase()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// Which keys of a keyed dataset to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSelection {
    Single(String),
    /// `(a|b|c)` syntax. Deduplicated, first occurrence wins.
    Set(Vec<String>),
}

impl IdSelection {
    /// A leading `(` marks a set. The first and last characters are dropped
    /// whatever the last one is, so `(a|b` selects `a` and the empty key.
    pub fn parse(raw: &str) -> Self {
        let Some(rest) = raw.strip_prefix('(') else {
            return Self::Single(raw.to_owned());
        };
        if rest.is_empty() {
            // A lone "(" has no interior to take.
            return Self::Set(vec![raw.to_owned()]);
        }
        let mut chars = rest.chars();
        chars.next_back();
        let inner = chars.as_str();
        let mut keys: Vec<String> = Vec::new();
        for key in inner.split('|') {
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_owned());
            }
        }
        Self::Set(keys)
    }

    pub fn keys(&self) -> &[String] {
        match self {
            Self::Single(key) => std::slice::from_ref(key),
            Self::Set(keys) => keys,
        }
    }
}
