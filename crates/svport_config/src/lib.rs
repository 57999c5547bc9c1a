//! Parsing and validation of `svport.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a strongly-typed
//! [`SvportConfig`] describing which sources to scan and how to report them.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
