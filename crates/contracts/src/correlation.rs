//! CorrelationId - links a diagnostic record to an audited packet

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Per-failure correlation token.
///
/// Generated fresh at the moment a failure or routing miss is detected,
/// never reused and never derived from the packet itself. The same value
/// appears on the diagnostic record and the audit record so the two streams
/// can be matched up during analysis.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a fresh correlation id.
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CorrelationId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = CorrelationId::fresh();
        let b = CorrelationId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_transparent() {
        let id = CorrelationId::fresh();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: CorrelationId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
