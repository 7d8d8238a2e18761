//! Driver run statistics.

use std::time::Duration;

use dispatcher::MetricsSnapshot;

/// Statistics from a driver run
#[derive(Debug, Clone, Default)]
pub struct DriverStats {
    /// Total packets pulled from the source
    pub packets_pulled: u64,

    /// Dispatches that completed normally (including contained failures)
    pub dispatched: u64,

    /// Dispatcher-level faults isolated by the driver
    pub dispatcher_faults: u64,

    /// Total duration of the run
    pub duration: Duration,
}

impl DriverStats {
    /// Calculate packets per second throughput
    pub fn throughput(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.packets_pulled as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Print detailed summary, including the engine's own counters
    pub fn print_summary(&self, engine: &MetricsSnapshot) {
        println!("\n=== Run Statistics ===\n");

        println!("Driver");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Packets pulled: {}", self.packets_pulled);
        println!("   ├─ Dispatches completed: {}", self.dispatched);
        println!("   ├─ Dispatcher faults isolated: {}", self.dispatcher_faults);
        println!("   └─ Throughput: {:.2} packets/s", self.throughput());

        println!("\nDispatch Engine");
        println!("   ├─ Handled: {}", engine.handled);
        println!("   ├─ Handler failures contained: {}", engine.handler_failures);
        println!("   ├─ Routing misses: {}", engine.routing_misses);
        println!("   └─ Internal faults raised: {}", engine.internal_faults);

        println!();
    }
}
