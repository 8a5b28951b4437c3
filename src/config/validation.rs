//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and parseability before anything starts
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the config; it runs before the
//!   config is accepted into the system

use hyper::Uri;
use thiserror::Error;

use super::schema::MonitorConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Probe endpoint is not a parseable absolute URI.
    #[error("probe.url {url:?} is not a valid URI: {reason}")]
    InvalidProbeUrl { url: String, reason: String },

    /// Probe endpoint has no host part to connect to.
    #[error("probe.url {url:?} has no host")]
    ProbeUrlWithoutHost { url: String },

    /// A zero timeout would turn every probe into an offline sample.
    #[error("probe.timeout_secs must be greater than zero")]
    ZeroProbeTimeout,

    /// The audit log path is empty.
    #[error("log.path must not be empty")]
    EmptyLogPath,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.probe.url.parse::<Uri>() {
        Ok(uri) if uri.host().is_none() => {
            errors.push(ValidationError::ProbeUrlWithoutHost {
                url: config.probe.url.clone(),
            });
        }
        Ok(_) => {}
        Err(reason) => {
            errors.push(ValidationError::InvalidProbeUrl {
                url: config.probe.url.clone(),
                reason: reason.to_string(),
            });
        }
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    if config.log.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyLogPath);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
