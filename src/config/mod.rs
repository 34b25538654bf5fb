//! Configuration loading

#[allow(clippy::module_inception)]
mod config;

pub use config::{Config, OutputFormat, CONFIG_DIR_ENV};
