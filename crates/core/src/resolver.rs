//! Value selection behind the `/search` endpoint.

use std::sync::Arc;

use serde::Serialize;

use crate::dataset::{DatasetCollection, DatasetValue, KeyedValues, Scalar};
use crate::error::ResolveError;
use crate::query::{IdSelection, Query};

/// One `{text, value}` pair of a SimpleJSON search response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultItem {
    pub text: Scalar,
    pub value: Scalar,
}

/// Resolves search targets against the datasets loaded at startup.
#[derive(Debug, Clone)]
pub struct QueryResolver {
    datasets: Arc<DatasetCollection>,
}

impl QueryResolver {
    #[must_use]
    pub const fn new(datasets: Arc<DatasetCollection>) -> Self {
        Self { datasets }
    }

    pub fn datasets(&self) -> &DatasetCollection {
        &self.datasets
    }

    /// Resolves a raw `target`. An absent or empty target yields no results.
    pub fn resolve(&self, target: Option<&str>) -> Result<Vec<ResultItem>, ResolveError> {
        resolve(target, &self.datasets)
    }
}

pub fn resolve(
    target: Option<&str>,
    datasets: &DatasetCollection,
) -> Result<Vec<ResultItem>, ResolveError> {
    let Some(target) = target.filter(|t| !t.is_empty()) else {
        return Ok(Vec::new());
    };
    if !target.starts_with('{') {
        return Err(ResolveError::InvalidQueryShape);
    }

    let query = Query::parse(target)?;
    let dataset = datasets
        .get(&query.data)
        .ok_or_else(|| ResolveError::UnknownDataset(query.data.clone()))?;

    let filter = query.contains.as_deref();
    let results = match dataset {
        DatasetValue::List(items) => select_list(items, filter),
        DatasetValue::Keyed(entries) => match &query.id {
            Some(ids) => select_ids(entries, ids, filter),
            None => select_keyed(entries, filter),
        },
    };
    tracing::debug!(data = %query.data, results = results.len(), "resolved search target");
    Ok(results)
}

fn matches(filter: Option<&str>, candidate: &str) -> bool {
    filter.is_none_or(|f| candidate.to_lowercase().contains(f))
}

fn select_list(items: &[Scalar], filter: Option<&str>) -> Vec<ResultItem> {
    items
        .iter()
        .filter(|item| matches(filter, &item.as_text()))
        .map(|item| ResultItem { text: item.clone(), value: item.clone() })
        .collect()
}

// A keyed entry passes the filter when either its key or its display text matches.
fn matches_entry(filter: Option<&str>, key: &str, text: &Scalar) -> bool {
    matches(filter, key) || matches(filter, &text.as_text())
}

fn select_keyed(entries: &KeyedValues, filter: Option<&str>) -> Vec<ResultItem> {
    entries
        .iter()
        .filter(|(key, text)| matches_entry(filter, key, text))
        .map(|(key, text)| ResultItem { text: text.clone(), value: Scalar::from(key.as_str()) })
        .collect()
}

fn select_ids(entries: &KeyedValues, ids: &IdSelection, filter: Option<&str>) -> Vec<ResultItem> {
    ids.keys()
        .iter()
        .filter_map(|key| entries.get(key).map(|text| (key.as_str(), text)))
        .filter(|(key, text)| matches_entry(filter, key, text))
        .map(|(key, text)| ResultItem { text: text.clone(), value: Scalar::from(key) })
        .collect()
}
