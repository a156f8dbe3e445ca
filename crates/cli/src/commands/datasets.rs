use anyhow::Result;
use std::path::PathBuf;

use crate::{load_datasets, resolve_data_path};

pub(crate) fn run(data: Option<PathBuf>) -> Result<()> {
    let datasets = load_datasets(&resolve_data_path(data))?;
    for name in datasets.names() {
        if let Some(dataset) = datasets.get(name) {
            println!("{name}\t{}\t{}", dataset.shape(), dataset.len());
        }
    }
    Ok(())
}
