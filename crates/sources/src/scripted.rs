//! Scripted packet source
//!
//! Plays a configured packet list with a fixed inter-packet delay,
//! simulating an independent producer thread.

use std::collections::VecDeque;
use std::time::Duration;

use contracts::{Packet, PacketSource};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Scripted source configuration
#[derive(Debug, Clone)]
pub struct ScriptedSourceConfig {
    /// Source name
    pub name: String,

    /// Delay before each packet is yielded
    pub interval: Duration,
}

impl Default for ScriptedSourceConfig {
    fn default() -> Self {
        Self {
            name: "scripted".to_string(),
            interval: Duration::from_millis(500),
        }
    }
}

/// Packet source that replays a fixed script.
///
/// Lazy and finite: each `next` call waits out the configured interval and
/// then yields the next scripted packet. Cancellation during the wait ends
/// the sequence immediately; an exhausted script is not restartable.
pub struct ScriptedSource {
    config: ScriptedSourceConfig,
    script: VecDeque<Packet>,
}

impl ScriptedSource {
    /// Create a new ScriptedSource from a packet list
    pub fn new(config: ScriptedSourceConfig, script: impl IntoIterator<Item = Packet>) -> Self {
        Self {
            config,
            script: script.into_iter().collect(),
        }
    }

    /// Packets remaining in the script
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl PacketSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.config.name
    }

    async fn next(&mut self, cancel: &CancellationToken) -> Option<Packet> {
        let packet = self.script.pop_front()?;

        tokio::select! {
            () = cancel.cancelled() => {
                debug!(source = %self.config.name, "Cancelled while waiting to yield");
                None
            }
            () = tokio::time::sleep(self.config.interval) => Some(packet),
        }
    }
}
