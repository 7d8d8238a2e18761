//! DiagnosticSink trait - structured operational error reporting
//!
//! An explicitly passed capability: components that emit failure-path
//! diagnostics receive a sink at construction time instead of reaching for
//! an ambient logger.

use crate::{CorrelationId, PacketId};

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// One leveled diagnostic record with structured fields.
///
/// Built with the level constructors and `with_*` methods:
///
/// ```
/// use contracts::{CorrelationId, Diagnostic, PacketId};
///
/// let correlation_id = CorrelationId::fresh();
/// let diagnostic = Diagnostic::error("no handler registered")
///     .with_correlation(correlation_id)
///     .with_packet(PacketId::new(4), "data");
/// assert_eq!(diagnostic.packet_id, Some(PacketId::new(4)));
/// ```
#[derive(Debug)]
pub struct Diagnostic<'a> {
    pub level: DiagnosticLevel,
    pub message: &'a str,
    pub correlation_id: Option<CorrelationId>,
    pub packet_id: Option<PacketId>,
    pub packet_kind: Option<&'a str>,
    pub cause: Option<&'a (dyn std::error::Error + Send + Sync + 'static)>,
}

impl<'a> Diagnostic<'a> {
    fn new(level: DiagnosticLevel, message: &'a str) -> Self {
        Self {
            level,
            message,
            correlation_id: None,
            packet_id: None,
            packet_kind: None,
            cause: None,
        }
    }

    /// Debug-level record
    pub fn debug(message: &'a str) -> Self {
        Self::new(DiagnosticLevel::Debug, message)
    }

    /// Info-level record
    pub fn info(message: &'a str) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    /// Warn-level record
    pub fn warn(message: &'a str) -> Self {
        Self::new(DiagnosticLevel::Warn, message)
    }

    /// Error-level record
    pub fn error(message: &'a str) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    /// Attach the correlation id shared with the matching audit record.
    pub fn with_correlation(mut self, correlation_id: CorrelationId) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Attach the offending packet's id and kind.
    pub fn with_packet(mut self, packet_id: PacketId, packet_kind: &'a str) -> Self {
        self.packet_id = Some(packet_id);
        self.packet_kind = Some(packet_kind);
        self
    }

    /// Attach the underlying failure.
    pub fn with_cause(mut self, cause: &'a (dyn std::error::Error + Send + Sync + 'static)) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// Diagnostic output trait.
///
/// Must be safe for concurrent use; multiple handlers can fail at the same
/// time. `emit` is synchronous and must not block the runtime; buffering
/// or forwarding is the implementation's business.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic<'_>);
}
