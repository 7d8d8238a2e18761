//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Routing Model
//! - A `Packet` carries a numeric `PacketId` that selects its handler
//! - Registration is one id → one handler, fixed at construction time
//! - Failure-path records are tied together by a fresh `CorrelationId`

mod audit;
mod correlation;
mod diagnostics;
mod error;
mod handler;
mod packet;
mod packet_id;
mod source;

pub use audit::{AuditReason, PacketAuditSink};
pub use correlation::CorrelationId;
pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink};
pub use error::*;
pub use handler::PacketHandler;
pub use packet::{Packet, PacketKind};
pub use packet_id::PacketId;
pub use source::{LocalPacketSource, PacketSource};
