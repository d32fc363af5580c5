//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Detect conflicting route inputs (source and manifest)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::AppConfig;
use crate::extract::is_identifier;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check the configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.settings.output_folder.as_os_str().is_empty() {
        errors.push(ValidationError::new("settings.output_folder", "must not be empty"));
    }

    let ssr = &config.ssr;
    if ssr.head_placeholder.is_empty() {
        errors.push(ValidationError::new("ssr.head_placeholder", "must not be empty"));
    }
    if ssr.body_placeholder.is_empty() {
        errors.push(ValidationError::new("ssr.body_placeholder", "must not be empty"));
    }
    if !ssr.head_placeholder.is_empty() && ssr.head_placeholder == ssr.body_placeholder {
        errors.push(ValidationError::new(
            "ssr.body_placeholder",
            "must differ from ssr.head_placeholder",
        ));
    }
    if ssr.start_marker.is_empty() {
        errors.push(ValidationError::new("ssr.start_marker", "must not be empty"));
    }
    if ssr.end_marker.is_empty() {
        errors.push(ValidationError::new("ssr.end_marker", "must not be empty"));
    }
    if !is_identifier(&ssr.register_fn) {
        errors.push(ValidationError::new(
            "ssr.register_fn",
            format!("'{}' is not an identifier", ssr.register_fn),
        ));
    }
    if ssr.source.is_some() && ssr.manifest.is_some() {
        errors.push(ValidationError::new(
            "ssr.manifest",
            "set either ssr.source or ssr.manifest, not both",
        ));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
