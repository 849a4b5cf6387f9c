//! Configuration module
//!
//! Settings for JSON conversion and logging, loaded from TOML.

pub mod config;

pub use config::{Config, ConversionConfig, LoggingConfig};
