//! Packet - the routed unit of work

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PacketId;

/// A fully-formed packet.
///
/// Constructed by a producer, immutable once dispatched. The dispatcher
/// routes on `id` and never inspects `payload`; interpreting the payload is
/// handler business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    /// Handler-selection id
    pub id: PacketId,

    /// Payload family label (used in diagnostics and audit records)
    pub kind: PacketKind,

    /// Opaque payload (零拷贝)
    pub payload: Bytes,
}

impl Packet {
    /// Create a packet with the default kind.
    pub fn new(id: PacketId, payload: impl Into<Bytes>) -> Self {
        Self {
            id,
            kind: PacketKind::default(),
            payload: payload.into(),
        }
    }

    /// Create a packet with an explicit kind.
    pub fn with_kind(id: PacketId, kind: impl Into<PacketKind>, payload: impl Into<Bytes>) -> Self {
        Self {
            id,
            kind: kind.into(),
            payload: payload.into(),
        }
    }
}

/// Packet kind label with cheap cloning.
///
/// Internally uses `Arc<str>` so cloning only increments a reference count.
/// Kinds are created once at configuration time and cloned on every
/// diagnostic and audit record.
#[derive(Clone)]
pub struct PacketKind(Arc<str>);

impl PacketKind {
    /// Create a new PacketKind from a string slice.
    #[inline]
    pub fn new(s: &str) -> Self {
        Self(Arc::from(s))
    }

    /// Get the underlying string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PacketKind {
    fn default() -> Self {
        Self(Arc::from("data"))
    }
}

impl Deref for PacketKind {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for PacketKind {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PacketKind {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PacketKind {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for PacketKind {
    #[inline]
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PacketKind({:?})", self.0)
    }
}

impl PartialEq for PacketKind {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for PacketKind {}

impl PartialEq<str> for PacketKind {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl PartialEq<&str> for PacketKind {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for PacketKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PacketKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_kind() {
        let packet = Packet::new(PacketId::new(1), vec![1, 2, 3]);
        assert_eq!(packet.kind, "data");
        assert_eq!(packet.payload.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn test_kind_clone_is_cheap() {
        let kind = PacketKind::new("telemetry");
        let kind2 = kind.clone();
        assert_eq!(kind.as_str().as_ptr(), kind2.as_str().as_ptr());
    }

    #[test]
    fn test_packet_serde() {
        let packet = Packet::with_kind(PacketId::new(2), "telemetry", vec![1u8, 2, 3]);
        let json = serde_json::to_string(&packet).unwrap();

        let parsed: Packet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, packet.id);
        assert_eq!(parsed.kind, packet.kind);
        assert_eq!(parsed.payload, packet.payload);
    }
}
