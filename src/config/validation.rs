//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::{Config, HistoryBackend};
use std::path::Path;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.admin is required")]
    MissingAdmin,
    #[error("server.admin must be a single token, got '{0}'")]
    AdminHasWhitespace(String),
    #[error("server.admin is longer than limits.max_name_length ({0})")]
    AdminTooLong(usize),
    #[error("history.capacity must be at least 1")]
    ZeroHistoryCapacity,
    #[error("history.path parent directory does not exist: {0}")]
    HistoryPathInvalid(String),
    #[error("limits.max_line_length must be at least 1")]
    ZeroLineLength,
    #[error("limits.max_name_length must be at least 1")]
    ZeroNameLength,
    #[error("limits.outbound_queue must be at least 1")]
    ZeroOutboundQueue,
    #[error("limits.message_rate_per_second must be at least 1")]
    ZeroMessageRate,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Admin identity
    let admin = &config.server.admin;
    if admin.is_empty() {
        errors.push(ValidationError::MissingAdmin);
    } else if admin.contains(char::is_whitespace) {
        errors.push(ValidationError::AdminHasWhitespace(admin.clone()));
    } else if admin.chars().count() > config.limits.max_name_length {
        errors.push(ValidationError::AdminTooLong(config.limits.max_name_length));
    }

    // History
    if config.history.capacity == 0 {
        errors.push(ValidationError::ZeroHistoryCapacity);
    }
    if config.history.backend == HistoryBackend::Redb {
        let path = Path::new(&config.history.path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            errors.push(ValidationError::HistoryPathInvalid(
                config.history.path.clone(),
            ));
        }
    }

    // Limits
    let limits = &config.limits;
    if limits.max_line_length == 0 {
        errors.push(ValidationError::ZeroLineLength);
    }
    if limits.max_name_length == 0 {
        errors.push(ValidationError::ZeroNameLength);
    }
    if limits.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }
    if limits.message_rate_per_second == 0 {
        errors.push(ValidationError::ZeroMessageRate);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
