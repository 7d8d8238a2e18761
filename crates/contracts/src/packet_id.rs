//! PacketId - numeric handler-selection key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Packet identifier.
///
/// Selects which handler a packet is routed to. Ids are not unique across a
/// stream; the same id recurs for every packet of that family.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PacketId(u32);

impl PacketId {
    /// Create a new PacketId.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw numeric value.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for PacketId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PacketId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_hashmap_key() {
        let mut map: HashMap<PacketId, &str> = HashMap::new();
        map.insert(PacketId::new(1), "one");
        map.insert(PacketId::new(2), "two");

        assert_eq!(map.get(&PacketId::new(1)), Some(&"one"));
        assert_eq!(map.get(&PacketId::new(3)), None);
    }

    #[test]
    fn test_serde_transparent() {
        let id = PacketId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");

        let parsed: PacketId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
