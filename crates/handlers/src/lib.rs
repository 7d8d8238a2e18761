//! # Handlers
//!
//! Demo handler implementations, one per packet id:
//! - `HeartbeatHandler` (id 1)
//! - `TelemetryHandler` (id 2) - fails on undecodable payloads
//! - `StatusHandler` (id 3)

mod heartbeat;
mod status;
mod telemetry;

pub use contracts::PacketHandler;
pub use heartbeat::HeartbeatHandler;
pub use status::StatusHandler;
pub use telemetry::TelemetryHandler;
