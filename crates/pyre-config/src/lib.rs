//! Configuration for the fireball viewer.
//!
//! Runtime-configurable settings that persist to disk as RON files, with
//! CLI overrides via clap and forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, ViewerConfig, WindowConfig};
pub use error::ConfigError;
