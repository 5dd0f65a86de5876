// SPDX-License-Identifier: MIT

//! Typed error handling for swarm-config
//!
//! Every fallible library operation returns [`SwarmConfigError`]. The binary
//! wraps it in `anyhow` at its edge.

use crate::swarm::validation::ValidationReport;
use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SwarmConfigError>;

/// Top-level error type for swarm-config
#[derive(Debug, Error)]
pub enum SwarmConfigError {
    /// Document or prompt file does not exist
    #[error("Swarm config file not found: {0}")]
    FileNotFound(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML parsing errors: missing required fields, type mismatches,
    /// unknown `output_type` variants
    #[error("Invalid swarm document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Document parsed but violates the schema invariants
    #[error("Validation failed with {count} error(s):\n{0}", count = .0.error_count())]
    Validation(ValidationReport),

    /// `swarm_type` tag is not a known orchestration strategy
    #[error("Unknown swarm type: {0}")]
    UnknownSwarmType(String),

    /// Malformed or missing `flow` expression
    #[error("Invalid flow: {0}")]
    InvalidFlow(String),
}

impl SwarmConfigError {
    /// Create a flow error
    pub fn invalid_flow(message: impl Into<String>) -> Self {
        Self::InvalidFlow(message.into())
    }

    /// The validation report carried by this error, if any
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }
}
