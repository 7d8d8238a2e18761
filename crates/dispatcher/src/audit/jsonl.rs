//! JsonlAuditSink - appends audit records to a JSON-lines file

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::{
    AuditReason, ContractError, CorrelationId, Packet, PacketAuditSink, PacketId, PacketKind,
};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// One persisted audit record
#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    recorded_at: DateTime<Utc>,
    reason: AuditReason,
    correlation_id: CorrelationId,
    packet_id: PacketId,
    kind: &'a PacketKind,
    payload: &'a [u8],
}

/// Sink that appends one JSON object per audit record to a file.
///
/// A separate record stream from the operational log: the correlation id is
/// what ties an entry back to the matching diagnostic. The writer lives
/// behind a `Mutex` so `record` is safe for concurrent use; each record is
/// flushed on write so a crash loses at most the record being written.
pub struct JsonlAuditSink {
    name: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlAuditSink {
    /// Create a new JsonlAuditSink appending to `path`.
    ///
    /// The parent directory must exist; the file is created if missing.
    pub fn new(name: impl Into<String>, path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            name: name.into(),
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Path of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PacketAuditSink for JsonlAuditSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "jsonl_audit_record",
        skip(self, packet),
        fields(sink = %self.name, packet_id = %packet.id)
    )]
    async fn record(
        &self,
        reason: AuditReason,
        correlation_id: CorrelationId,
        packet: &Packet,
    ) -> Result<(), ContractError> {
        let entry = AuditEntry {
            recorded_at: Utc::now(),
            reason,
            correlation_id,
            packet_id: packet.id,
            kind: &packet.kind,
            payload: &packet.payload,
        };

        let line = serde_json::to_string(&entry)
            .map_err(|e| ContractError::audit_write(&self.name, e.to_string()))?;

        let mut writer = self.writer.lock().await;
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| ContractError::audit_write(&self.name, e.to_string()))?;

        debug!(sink = %self.name, correlation_id = %correlation_id, "Audit record persisted");
        Ok(())
    }
}
