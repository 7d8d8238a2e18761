//! PacketDispatcher - per-packet dispatch protocol with fault isolation

use std::sync::Arc;

use contracts::{
    AuditReason, CorrelationId, Diagnostic, DiagnosticSink, Packet, PacketAuditSink,
    PacketHandler, PacketId,
};
use observability::{record_dispatch_outcome, DispatchOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

use crate::error::DispatcherError;
use crate::metrics::DispatchMetrics;
use crate::routing::RoutingTable;

/// Builder for creating a PacketDispatcher
pub struct DispatcherBuilder {
    handlers: Vec<Arc<dyn PacketHandler>>,
    fault_injection: Option<PacketId>,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            fault_injection: None,
        }
    }

    /// Register a handler. Duplicate ids are rejected at `build` time.
    pub fn register(mut self, handler: Arc<dyn PacketHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Register a whole handler collection.
    pub fn register_all(
        mut self,
        handlers: impl IntoIterator<Item = Arc<dyn PacketHandler>>,
    ) -> Self {
        self.handlers.extend(handlers);
        self
    }

    /// Inject an engine-level fault for the given packet id.
    ///
    /// Dispatching a packet with this id makes `dispatch` itself fail
    /// before any routing lookup. Used to demonstrate that dispatcher
    /// faults, unlike handler faults, escape the engine and must be
    /// isolated one layer up, by the driver loop.
    pub fn inject_fault(mut self, id: PacketId) -> Self {
        self.fault_injection = Some(id);
        self
    }

    /// Build the dispatcher, constructing the routing table eagerly.
    ///
    /// # Errors
    /// `DispatcherError::DuplicateHandler` if two handlers declare the same
    /// id; the dispatcher must not come into existence mis-configured.
    pub fn build(
        self,
        diagnostics: Arc<dyn DiagnosticSink>,
        audit: Arc<dyn PacketAuditSink>,
    ) -> Result<PacketDispatcher, DispatcherError> {
        let routes = RoutingTable::build(self.handlers, diagnostics.as_ref())?;
        debug!(routes = routes.len(), "Routing table built");

        Ok(PacketDispatcher {
            routes,
            diagnostics,
            audit,
            metrics: Arc::new(DispatchMetrics::new()),
            fault_injection: self.fault_injection,
        })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The packet dispatcher.
///
/// Owns the routing table for its lifetime and shares the diagnostic and
/// audit sinks with the rest of the process. The routing table is read-only
/// after construction, so concurrent `dispatch` calls share no mutable
/// dispatcher state and the type is safe to use from multiple tasks.
///
/// The central invariant: a failing handler never causes `dispatch` itself
/// to fail. Handler failures and unroutable packets are converted to a
/// contained side channel (error diagnostic + audit record, tied together
/// by a fresh correlation id) and `dispatch` completes normally. Only a
/// fault in the dispatcher's own logic escapes to the caller.
pub struct PacketDispatcher {
    routes: RoutingTable,
    diagnostics: Arc<dyn DiagnosticSink>,
    audit: Arc<dyn PacketAuditSink>,
    metrics: Arc<DispatchMetrics>,
    fault_injection: Option<PacketId>,
}

impl PacketDispatcher {
    /// Start a builder.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Dispatch metrics handle.
    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    /// Number of registered routes.
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Dispatch one packet to its handler.
    ///
    /// Routing misses and handler failures are handled internally: each
    /// produces exactly one error diagnostic and one audit record with a
    /// fresh correlation id, and the call still returns `Ok(())`. If the
    /// cancellation token is already set the resolved handler returns
    /// immediately by contract, also `Ok(())`; cancellation is not routed
    /// through the failure side channel.
    ///
    /// # Errors
    /// `DispatcherError::InternalFault` when the packet id matches the
    /// injected engine fault; raised before any routing lookup, with no
    /// diagnostic or audit record from the engine. The caller owns
    /// isolating this case.
    #[instrument(
        name = "dispatch",
        skip(self, packet, cancel),
        fields(packet_id = %packet.id, kind = %packet.kind)
    )]
    pub async fn dispatch(
        &self,
        packet: &Packet,
        cancel: &CancellationToken,
    ) -> Result<(), DispatcherError> {
        if self.fault_injection == Some(packet.id) {
            self.metrics.inc_internal_faults();
            return Err(DispatcherError::InternalFault { id: packet.id });
        }

        match self.routes.resolve(packet.id) {
            Some(handler) => match handler.process(packet, cancel).await {
                Ok(()) => {
                    self.metrics.inc_handled();
                    record_dispatch_outcome(DispatchOutcome::Handled);
                    Ok(())
                }
                Err(e) => {
                    // Isolation boundary: the handler's failure ends here.
                    self.metrics.inc_handler_failures();
                    record_dispatch_outcome(DispatchOutcome::HandlerFailure);
                    self.quarantine(packet, "Failed handling packet", Some(&e))
                        .await;
                    Ok(())
                }
            },
            None => {
                // Routing miss - an expected outcome, not an error to the caller
                self.metrics.inc_routing_misses();
                record_dispatch_outcome(DispatchOutcome::RoutingMiss);
                self.quarantine(packet, "Unexpected packet with no registered handler", None)
                    .await;
                Ok(())
            }
        }
    }

    /// Contained failure side channel: fresh correlation id, error
    /// diagnostic, audit record. Audit write failures are logged and
    /// swallowed: the side channel is best-effort and must not fault the
    /// dispatch flow.
    async fn quarantine(
        &self,
        packet: &Packet,
        message: &str,
        cause: Option<&(dyn std::error::Error + Send + Sync + 'static)>,
    ) {
        let correlation_id = CorrelationId::fresh();

        let mut diagnostic = Diagnostic::error(message)
            .with_correlation(correlation_id)
            .with_packet(packet.id, &packet.kind);
        if let Some(cause) = cause {
            diagnostic = diagnostic.with_cause(cause);
        }
        self.diagnostics.emit(diagnostic);

        if let Err(e) = self
            .audit
            .record(AuditReason::Error, correlation_id, packet)
            .await
        {
            error!(
                sink = %self.audit.name(),
                correlation_id = %correlation_id,
                error = %e,
                "Audit record write failed"
            );
        }
    }
}
