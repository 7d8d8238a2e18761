//! PacketHandler trait - per-id packet processing

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{ContractError, Packet, PacketId};

/// Packet processing trait.
///
/// A handler declares exactly one `handled_id`, fixed for its lifetime.
/// The routing table is built from a collection of these; registering two
/// handlers for the same id is a configuration error.
///
/// Handlers must check the cancellation token promptly and return `Ok(())`
/// without side effects when it is already cancelled. A handler may fail
/// with any `ContractError` to signal it cannot process a packet's content;
/// containing that failure is the dispatcher's responsibility, not the
/// handler's. Long work must stay cancellable rather than block the
/// runtime.
#[async_trait]
pub trait PacketHandler: Send + Sync {
    /// Handler name (used for logging and duplicate-registration reporting)
    fn name(&self) -> &str;

    /// The single packet id this handler processes
    fn handled_id(&self) -> PacketId;

    /// Process one packet.
    ///
    /// # Errors
    /// Returns a processing error (should include context); the dispatcher
    /// contains it behind the isolation boundary.
    async fn process(
        &self,
        packet: &Packet,
        cancel: &CancellationToken,
    ) -> Result<(), ContractError>;
}
