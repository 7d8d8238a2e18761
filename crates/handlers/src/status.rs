//! Status handler

use std::sync::Arc;

use async_trait::async_trait;
use contracts::{
    ContractError, Diagnostic, DiagnosticSink, Packet, PacketHandler, PacketId,
};
use tokio_util::sync::CancellationToken;

const HANDLED_ID: PacketId = PacketId::new(3);

/// Handler for status packets.
pub struct StatusHandler {
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl StatusHandler {
    /// Create a new StatusHandler
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }
}

#[async_trait]
impl PacketHandler for StatusHandler {
    fn name(&self) -> &str {
        "status"
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
            Diagnostic::info("Status update received").with_packet(packet.id, &packet.kind),
        );
        Ok(())
    }
}
