//! Layered error definitions
//!
//! Categorized by source: config / handler / source / audit

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Handler Errors =====
    /// Payload decode error
    #[error("handler '{handler}' cannot decode payload: {message}")]
    PayloadDecode { handler: String, message: String },

    /// Handler processing error
    #[error("handler '{handler}' failed: {message}")]
    HandlerFailure { handler: String, message: String },

    // ===== Source Errors =====
    /// Producer-side error
    #[error("source '{source_name}' error: {message}")]
    SourceFailure { source_name: String, message: String },

    // ===== Audit Errors =====
    /// Audit record write error
    #[error("audit sink '{sink_name}' write error: {message}")]
    AuditWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create payload decode error
    pub fn payload_decode(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PayloadDecode {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create handler failure error
    pub fn handler_failure(handler: impl Into<String>, message: impl Into<String>) -> Self {
        Self::HandlerFailure {
            handler: handler.into(),
            message: message.into(),
        }
    }

    /// Create audit write error
    pub fn audit_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AuditWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
