//! TracingDiagnostics - DiagnosticSink backed by tracing

use contracts::{Diagnostic, DiagnosticLevel, DiagnosticSink};
use tracing::{debug, error, info, warn};

/// Production `DiagnosticSink` that forwards records to the tracing
/// pipeline with structured fields.
///
/// Components receive this as an explicit capability at construction time;
/// the subscriber configured in `init_with_config` decides formatting and
/// filtering.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    /// Create a new TracingDiagnostics
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic<'_>) {
        let correlation_id = diagnostic.correlation_id.map(|c| c.to_string());
        let correlation_id = correlation_id.as_deref();
        let packet_id = diagnostic.packet_id.map(|p| p.value());
        let cause = diagnostic.cause.map(|e| e.to_string());
        let cause = cause.as_deref();

        match diagnostic.level {
            DiagnosticLevel::Debug => debug!(
                correlation_id,
                packet_id,
                packet_kind = diagnostic.packet_kind,
                cause,
                "{}",
                diagnostic.message
            ),
            DiagnosticLevel::Info => info!(
                correlation_id,
                packet_id,
                packet_kind = diagnostic.packet_kind,
                cause,
                "{}",
                diagnostic.message
            ),
            DiagnosticLevel::Warn => warn!(
                correlation_id,
                packet_id,
                packet_kind = diagnostic.packet_kind,
                cause,
                "{}",
                diagnostic.message
            ),
            DiagnosticLevel::Error => error!(
                correlation_id,
                packet_id,
                packet_kind = diagnostic.packet_kind,
                cause,
                "{}",
                diagnostic.message
            ),
        }
    }
}
