use anyhow::Result;
use std::path::PathBuf;
use valuemap_core::resolve;

use crate::{load_datasets, resolve_data_path};

pub(crate) fn run(target: &str, data: Option<PathBuf>) -> Result<()> {
    let datasets = load_datasets(&resolve_data_path(data))?;
    let results = resolve(Some(target), &datasets)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
