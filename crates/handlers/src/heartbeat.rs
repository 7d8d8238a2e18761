//! Heartbeat handler

use std::sync::Arc;

use async_trait::async_trait;
use contracts::{
    ContractError, Diagnostic, DiagnosticSink, Packet, PacketHandler, PacketId,
};
use tokio_util::sync::CancellationToken;

const HANDLED_ID: PacketId = PacketId::new(1);

/// Handler for heartbeat packets.
///
/// Heartbeats carry no actionable payload; receipt itself is the signal.
pub struct HeartbeatHandler {
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl HeartbeatHandler {
    /// Create a new HeartbeatHandler
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }
}

#[async_trait]
impl PacketHandler for HeartbeatHandler {
    fn name(&self) -> &str {
        "heartbeat"
    }

    fn handled_id(&self) -> PacketId {
        HANDLED_ID
    }

    async fn process(
        &self,
        packet: &Packet,
        cancel: &CancellationToken,
    ) -> Result<(), ContractError> {
        if cancel.is_cancelled() {
            return Ok(());
        }

        self.diagnostics.emit(
            Diagnostic::info("Heartbeat received").with_packet(packet.id, &packet.kind),
        );
        Ok(())
    }
}
