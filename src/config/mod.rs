//! Configuration management

mod settings;

pub use settings::{AppConfig, OutputFormat, CONFIG_VERSION};
