//! Telemetry handler
//!
//! Decodes telemetry payloads; undecodable payloads are a handler failure
//! for the dispatcher's isolation boundary to contain.

use std::sync::Arc;

use async_trait::async_trait;
use contracts::{
    ContractError, Diagnostic, DiagnosticSink, Packet, PacketHandler, PacketId,
};
use tokio_util::sync::CancellationToken;

const HANDLED_ID: PacketId = PacketId::new(2);

/// Handler for telemetry packets.
///
/// Payload layout: first byte is the record version (must be non-zero),
/// remaining bytes are the reading. Anything else cannot be processed.
pub struct TelemetryHandler {
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl TelemetryHandler {
    /// Create a new TelemetryHandler
    pub fn new(diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self { diagnostics }
    }

    fn decode(&self, packet: &Packet) -> Result<(), ContractError> {
        let Some(&version) = packet.payload.first() else {
            return Err(ContractError::payload_decode(self.name(), "empty payload"));
        };
        if version == 0 {
            return Err(ContractError::payload_decode(
                self.name(),
                "unsupported record version 0",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl PacketHandler for TelemetryHandler {
    fn name(&self) -> &str {
        "telemetry"
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

        self.decode(packet)?;

        self.diagnostics.emit(
            Diagnostic::info("Telemetry reading accepted").with_packet(packet.id, &packet.kind),
        );
        Ok(())
    }
}
