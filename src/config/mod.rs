//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, ListenConfig)
//! - [`history`]: History storage configuration (HistoryConfig, HistoryBackend)
//! - [`limits`]: Per-session limits (LimitsConfig)
//! - [`validation`]: Startup validation (validate, ValidationError)

mod history;
mod limits;
mod types;
mod validation;

pub use history::{HistoryBackend, HistoryConfig};
pub use limits::LimitsConfig;
pub use types::{Config, ConfigError, ListenConfig, ServerConfig};
pub use validation::{ValidationError, validate};
