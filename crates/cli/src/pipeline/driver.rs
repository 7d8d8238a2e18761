//! Driver loop - pulls packets and feeds the dispatcher.
//!
//! The driver is the isolation layer above the engine: handler failures
//! never reach it (the dispatcher contains those), but a fault in the
//! dispatcher's own logic does, and the loop must survive it and move on
//! to the next packet.

use std::sync::Arc;
use std::time::Instant;

use contracts::{
    AuditReason, CorrelationId, Diagnostic, DiagnosticSink, PacketAuditSink, PacketSource,
};
use dispatcher::PacketDispatcher;
use observability::{record_dispatch_outcome, record_packet_pulled, DispatchOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::stats::DriverStats;

/// Run the driver loop to completion.
///
/// Packets are processed strictly in producer order, one dispatch at a
/// time. The loop ends when the source is exhausted or the token is
/// cancelled; no single packet's fate can end it early. A dispatcher-level
/// fault is logged with a fresh correlation id, the offending packet is
/// audited, and the loop continues.
pub async fn drive<S: PacketSource>(
    mut source: S,
    dispatcher: &PacketDispatcher,
    diagnostics: &Arc<dyn DiagnosticSink>,
    audit: &Arc<dyn PacketAuditSink>,
    cancel: &CancellationToken,
) -> DriverStats {
    let started = Instant::now();
    let mut stats = DriverStats::default();

    info!(source = %source.name(), routes = dispatcher.route_count(), "Driver loop started");

    while let Some(packet) = source.next(cancel).await {
        if cancel.is_cancelled() {
            break;
        }

        stats.packets_pulled += 1;
        record_packet_pulled();

        match dispatcher.dispatch(&packet, cancel).await {
            Ok(()) => {
                stats.dispatched += 1;
                debug!(packet_id = %packet.id, "Dispatch completed");
            }
            Err(e) => {
                // Dispatcher faults are ours to contain; the next packet
                // must still be processed.
                stats.dispatcher_faults += 1;
                record_dispatch_outcome(DispatchOutcome::InternalFault);

                let correlation_id = CorrelationId::fresh();
                diagnostics.emit(
                    Diagnostic::error("Dispatcher fault while dispatching packet")
                        .with_correlation(correlation_id)
                        .with_packet(packet.id, &packet.kind)
                        .with_cause(&e),
                );
                if let Err(audit_err) = audit
                    .record(AuditReason::Error, correlation_id, &packet)
                    .await
                {
                    tracing::error!(
                        sink = %audit.name(),
                        correlation_id = %correlation_id,
                        error = %audit_err,
                        "Audit record write failed"
                    );
                }
            }
        }
    }

    stats.duration = started.elapsed();

    info!(
        packets = stats.packets_pulled,
        faults = stats.dispatcher_faults,
        duration_secs = stats.duration.as_secs_f64(),
        "Driver loop finished"
    );

    stats
}
