//! Channel-backed packet source
//!
//! Pull side of an async channel, for wiring an external producer task to
//! the driver loop without exposing channel details downstream.

use async_channel::Receiver;
use contracts::{Packet, PacketSource};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Packet source backed by an `async_channel` receiver.
///
/// Yields packets in the order the producer sends them; ends when the
/// channel is closed and drained, or when the token is cancelled.
pub struct ChannelSource {
    name: String,
    rx: Receiver<Packet>,
}

impl ChannelSource {
    /// Create a new ChannelSource
    pub fn new(name: impl Into<String>, rx: Receiver<Packet>) -> Self {
        Self {
            name: name.into(),
            rx,
        }
    }
}

impl PacketSource for ChannelSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn next(&mut self, cancel: &CancellationToken) -> Option<Packet> {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(source = %self.name, "Cancelled while waiting for producer");
                None
            }
            received = self.rx.recv() => received.ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::PacketId;

    #[tokio::test]
    async fn test_yields_sent_packets_then_ends_on_close() {
        let (tx, rx) = async_channel::bounded(4);
        let mut source = ChannelSource::new("test", rx);
        let cancel = CancellationToken::new();

        tx.send(Packet::new(PacketId::new(1), vec![1u8]))
            .await
            .unwrap();
        tx.send(Packet::new(PacketId::new(2), vec![2u8]))
            .await
            .unwrap();
        drop(tx);

        assert_eq!(source.next(&cancel).await.unwrap().id, PacketId::new(1));
        assert_eq!(source.next(&cancel).await.unwrap().id, PacketId::new(2));
        assert!(source.next(&cancel).await.is_none());
    }

    #[tokio::test]
    async fn test_cancellation_ends_stream() {
        let (tx, rx) = async_channel::bounded::<Packet>(1);
        let mut source = ChannelSource::new("test", rx);
        let cancel = CancellationToken::new();
        cancel.cancel();

        // Producer still alive, but the token ends the pull
        assert!(source.next(&cancel).await.is_none());
        drop(tx);
    }
}
