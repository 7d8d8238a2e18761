//! PacketSource trait - upstream packet producer abstraction

use tokio_util::sync::CancellationToken;

use crate::Packet;

/// Pull-based packet producer.
///
/// A lazy, ordered, finite sequence of packets. `next` suspends until the
/// next packet is available and returns `None` once the sequence is
/// exhausted or the token is cancelled; an exhausted source is not
/// restartable.
#[trait_variant::make(PacketSource: Send)]
pub trait LocalPacketSource {
    /// Source name (used for logging)
    fn name(&self) -> &str;

    /// Produce the next packet, or `None` on exhaustion/cancellation.
    async fn next(&mut self, cancel: &CancellationToken) -> Option<Packet>;
}
