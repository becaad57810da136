//! Data models: extracted records and pipeline configuration.

pub mod config;
pub mod record;
