//! Dispatch metrics recording helpers

use metrics::counter;

/// Terminal outcome of one dispatch, as seen by the driver loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler completed successfully
    Handled,
    /// Handler failed; contained by the engine
    HandlerFailure,
    /// No handler registered for the id
    RoutingMiss,
    /// Engine-level fault, isolated by the driver
    InternalFault,
}

impl DispatchOutcome {
    fn label(self) -> &'static str {
        match self {
            DispatchOutcome::Handled => "handled",
            DispatchOutcome::HandlerFailure => "handler_failure",
            DispatchOutcome::RoutingMiss => "routing_miss",
            DispatchOutcome::InternalFault => "internal_fault",
        }
    }
}

/// Record one packet pulled from the source.
pub fn record_packet_pulled() {
    counter!("router_packets_pulled_total").increment(1);
}

/// Record one dispatch outcome.
pub fn record_dispatch_outcome(outcome: DispatchOutcome) {
    counter!("router_dispatches_total", "outcome" => outcome.label()).increment(1);
}
