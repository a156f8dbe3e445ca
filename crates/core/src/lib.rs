//! Core types for valuemap
//!
//! Dataset model, search query parsing and value resolution for the Grafana
//! SimpleJSON `/search` contract. Contains no HTTP concerns.

mod config;
mod dataset;
mod env_config;
mod error;
mod query;
mod resolver;

pub use config::*;
pub use dataset::*;
pub use env_config::*;
pub use error::*;
pub use query::*;
pub use resolver::*;
