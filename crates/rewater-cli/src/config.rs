//! Layered configuration: built-in defaults, then an optional TOML file, then the
//! command line.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::{build_config, build_registry};
pub use models::AppConfig;
