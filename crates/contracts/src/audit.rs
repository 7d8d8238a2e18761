//! PacketAuditSink trait - packet audit record side channel

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ContractError, CorrelationId, Packet};

/// Why a packet was audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditReason {
    Debug,
    Error,
}

impl fmt::Display for AuditReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditReason::Debug => write!(f, "debug"),
            AuditReason::Error => write!(f, "error"),
        }
    }
}

/// Packet audit trait.
///
/// Records a packet occurrence tagged with a reason and a correlation id.
/// This is a best-effort side channel: implementations must be safe for
/// concurrent use, and callers log a failed `record` and keep going rather
/// than letting it abort the dispatch flow. `record` takes no cancellation
/// token: audit writes are short and must complete even while the pipeline
/// is winding down.
#[async_trait]
pub trait PacketAuditSink: Send + Sync {
    /// Sink name (used for logging)
    fn name(&self) -> &str;

    /// Record one packet occurrence.
    ///
    /// # Errors
    /// Returns a write error (should include context)
    async fn record(
        &self,
        reason: AuditReason,
        correlation_id: CorrelationId,
        packet: &Packet,
    ) -> Result<(), ContractError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display() {
        assert_eq!(AuditReason::Debug.to_string(), "debug");
        assert_eq!(AuditReason::Error.to_string(), "error");
    }

    #[test]
    fn test_reason_serde() {
        assert_eq!(
            serde_json::to_string(&AuditReason::Error).unwrap(),
            "\"error\""
        );
    }
}
