//! Scenario configuration types

use contracts::{Packet, PacketId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// A complete run scenario: packet script, dispatcher knobs, audit sink.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Scenario {
    /// Packet source configuration
    #[validate(nested)]
    pub source: SourceConfig,

    /// Dispatcher configuration
    #[serde(default)]
    pub dispatcher: DispatcherConfig,

    /// Audit sink configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Scripted source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SourceConfig {
    /// Delay between packets, in milliseconds
    #[validate(range(min = 1))]
    pub interval_ms: u64,

    /// The packet script, played in order
    pub packets: Vec<PacketSpec>,
}

/// One scripted packet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacketSpec {
    /// Handler-selection id
    pub id: u32,

    /// Payload family label (defaults to "data")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Payload bytes
    #[serde(default)]
    pub payload: Vec<u8>,
}

impl PacketSpec {
    /// Build the runtime packet for this spec.
    pub fn to_packet(&self) -> Packet {
        match &self.kind {
            Some(kind) => Packet::with_kind(PacketId::new(self.id), kind.as_str(), self.payload.clone()),
            None => Packet::new(PacketId::new(self.id), self.payload.clone()),
        }
    }
}

/// Dispatcher knobs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Packet id that trips an engine-level fault (demo/conformance knob)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault_injection: Option<u32>,
}

/// Audit sink selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Which sink implementation to use
    #[serde(default)]
    pub sink: AuditSinkKind,

    /// Record file path (required for `jsonl`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Audit sink implementations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Log records through the operational log stream
    #[default]
    Log,
    /// Append records to a JSON-lines file
    Jsonl,
}

impl Scenario {
    /// The reference demo scenario.
    ///
    /// Ten packets through handlers for ids 1/2/3: id 4 has no handler,
    /// id 5 trips the injected dispatcher fault, and the seventh packet
    /// carries the undecodable telemetry payload.
    pub fn reference() -> Self {
        const READING: [u8; 3] = [1, 2, 3];
        const BAD_READING: [u8; 3] = [0, 1, 2];

        let spec = |id: u32, payload: &[u8]| PacketSpec {
            id,
            kind: match id {
                1 => Some("heartbeat".to_string()),
                2 => Some("telemetry".to_string()),
                3 => Some("status".to_string()),
                _ => None,
            },
            payload: payload.to_vec(),
        };

        Self {
            source: SourceConfig {
                interval_ms: 500,
                packets: vec![
                    spec(1, &READING),
                    spec(2, &READING),
                    spec(3, &READING),
                    spec(4, &READING),
                    spec(2, &READING),
                    spec(5, &READING),
                    spec(2, &BAD_READING),
                    spec(3, &READING),
                    spec(2, &READING),
                    spec(1, &READING),
                ],
            },
            dispatcher: DispatcherConfig {
                fault_injection: Some(5),
            },
            audit: AuditConfig::default(),
        }
    }
}
