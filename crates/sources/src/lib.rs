//! # Sources
//!
//! `PacketSource` implementations:
//! - `ScriptedSource`: plays a fixed packet list on a timer (demo/testing)
//! - `ChannelSource`: pulls from an async channel fed by an external producer

mod channel;
mod scripted;

pub use channel::ChannelSource;
pub use contracts::{Packet, PacketSource};
pub use scripted::{ScriptedSource, ScriptedSourceConfig};
