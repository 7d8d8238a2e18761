//! Dispatcher error types

use contracts::PacketId;
use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Duplicate handler registration - configuration error, fatal at build time
    #[error(
        "cannot register handler '{handler}' for packet id {id}: \
         id is already registered to handler '{existing}'"
    )]
    DuplicateHandler {
        id: PacketId,
        handler: String,
        existing: String,
    },

    /// Internal dispatcher fault - escapes `dispatch` and must be isolated
    /// by the caller, unlike handler failures which never escape
    #[error("internal dispatcher fault on packet id {id}")]
    InternalFault { id: PacketId },

    /// Contract-level error
    #[error("contract error: {0}")]
    Contract(#[from] contracts::ContractError),
}

impl DispatcherError {
    /// Create a duplicate-handler registration error
    pub fn duplicate_handler(
        id: PacketId,
        handler: impl Into<String>,
        existing: impl Into<String>,
    ) -> Self {
        Self::DuplicateHandler {
            id,
            handler: handler.into(),
            existing: existing.into(),
        }
    }
}
