//! LogAuditSink - forwards audit records to tracing

use async_trait::async_trait;
use contracts::{AuditReason, ContractError, CorrelationId, Packet, PacketAuditSink};
use tracing::{error, info, instrument};

/// Sink that logs audit records to the operational log stream.
///
/// Performs no deep payload serialization: the record carries the packet's
/// id, kind and payload length plus the correlation id, which is enough to
/// match the entry up with the primary log stream during analysis.
pub struct LogAuditSink {
    name: String,
}

impl LogAuditSink {
    /// Create a new LogAuditSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl PacketAuditSink for LogAuditSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_audit_record",
        skip(self, packet),
        fields(sink = %self.name, packet_id = %packet.id)
    )]
    async fn record(
        &self,
        reason: AuditReason,
        correlation_id: CorrelationId,
        packet: &Packet,
    ) -> Result<(), ContractError> {
        match reason {
            AuditReason::Debug => info!(
                sink = %self.name,
                correlation_id = %correlation_id,
                packet_id = %packet.id,
                kind = %packet.kind,
                payload_len = packet.payload.len(),
                "Packet audited"
            ),
            AuditReason::Error => error!(
                sink = %self.name,
                correlation_id = %correlation_id,
                packet_id = %packet.id,
                kind = %packet.kind,
                payload_len = packet.payload.len(),
                "Packet audited"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::PacketId;

    #[tokio::test]
    async fn test_log_audit_record() {
        let sink = LogAuditSink::new("test_audit");
        let packet = Packet::new(PacketId::new(1), vec![1, 2, 3]);

        let result = sink
            .record(AuditReason::Error, CorrelationId::fresh(), &packet)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_audit_sink_name() {
        let sink = LogAuditSink::new("my_audit");
        assert_eq!(sink.name(), "my_audit");
    }
}
