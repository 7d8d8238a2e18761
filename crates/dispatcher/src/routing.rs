//! Routing table - immutable id → handler mapping

use std::collections::HashMap;
use std::sync::Arc;

use contracts::{Diagnostic, DiagnosticSink, PacketHandler, PacketId};
use tracing::debug;

use crate::error::DispatcherError;

/// Immutable mapping from packet id to handler.
///
/// Built once from a collection of handlers; read-only for the engine's
/// lifetime (no hot-reload), which makes concurrent lookups safe without
/// locks.
pub struct RoutingTable {
    routes: HashMap<PacketId, Arc<dyn PacketHandler>>,
}

impl RoutingTable {
    /// Build a routing table from a handler collection.
    ///
    /// Handlers are iterated once. A second handler declaring an already
    /// registered id is a configuration error: an error-level diagnostic
    /// naming both handlers is emitted first, then construction fails.
    /// No partially built table is observable; last-registration-wins is
    /// deliberately not an option here.
    ///
    /// # Errors
    /// `DispatcherError::DuplicateHandler` on the first id collision.
    pub fn build(
        handlers: impl IntoIterator<Item = Arc<dyn PacketHandler>>,
        diagnostics: &dyn DiagnosticSink,
    ) -> Result<Self, DispatcherError> {
        let mut routes: HashMap<PacketId, Arc<dyn PacketHandler>> = HashMap::new();

        for handler in handlers {
            let id = handler.handled_id();
            if let Some(existing) = routes.get(&id) {
                let message = format!(
                    "cannot register handler '{}' for packet id {}: \
                     id is already registered to handler '{}'",
                    handler.name(),
                    id,
                    existing.name()
                );
                diagnostics.emit(Diagnostic::error(&message));
                return Err(DispatcherError::duplicate_handler(
                    id,
                    handler.name(),
                    existing.name(),
                ));
            }

            debug!(handler = %handler.name(), id = %id, "Handler registered");
            routes.insert(id, handler);
        }

        Ok(Self { routes })
    }

    /// Look up the handler for a packet id.
    pub fn resolve(&self, id: PacketId) -> Option<&Arc<dyn PacketHandler>> {
        self.routes.get(&id)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered ids, in no particular order.
    pub fn handled_ids(&self) -> impl Iterator<Item = PacketId> + '_ {
        self.routes.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::{ContractError, Packet};
    use std::sync::Mutex;
    use tokio_util::sync::CancellationToken;

    struct NamedHandler {
        name: String,
        id: PacketId,
    }

    #[async_trait]
    impl PacketHandler for NamedHandler {
        fn name(&self) -> &str {
            &self.name
        }

        fn handled_id(&self) -> PacketId {
            self.id
        }

        async fn process(
            &self,
            _packet: &Packet,
            _cancel: &CancellationToken,
        ) -> Result<(), ContractError> {
            Ok(())
        }
    }

    fn handler(name: &str, id: u32) -> Arc<dyn PacketHandler> {
        Arc::new(NamedHandler {
            name: name.to_string(),
            id: PacketId::new(id),
        })
    }

    #[derive(Default)]
    struct RecordingDiagnostics {
        errors: Mutex<Vec<String>>,
    }

    impl DiagnosticSink for RecordingDiagnostics {
        fn emit(&self, diagnostic: Diagnostic<'_>) {
            if diagnostic.level == contracts::DiagnosticLevel::Error {
                self.errors.lock().unwrap().push(diagnostic.message.to_string());
            }
        }
    }

    #[test]
    fn test_build_unique_ids() {
        let diagnostics = RecordingDiagnostics::default();
        let table = RoutingTable::build(
            vec![handler("one", 1), handler("two", 2), handler("three", 3)],
            &diagnostics,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert!(table.resolve(PacketId::new(2)).is_some());
        assert!(table.resolve(PacketId::new(4)).is_none());
        assert!(diagnostics.errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_build_duplicate_id_fails() {
        let diagnostics = RecordingDiagnostics::default();
        let result = RoutingTable::build(
            vec![handler("first", 7), handler("second", 7)],
            &diagnostics,
        );

        match result.err() {
            Some(DispatcherError::DuplicateHandler {
                id,
                handler,
                existing,
            }) => {
                assert_eq!(id, PacketId::new(7));
                assert_eq!(handler, "second");
                assert_eq!(existing, "first");
            }
            other => panic!("expected DuplicateHandler, got {other:?}"),
        }

        // The diagnostic precedes the error and names both handlers
        let errors = diagnostics.errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("second"));
        assert!(errors[0].contains("first"));
    }

    #[test]
    fn test_empty_table() {
        let diagnostics = RecordingDiagnostics::default();
        let table = RoutingTable::build(vec![], &diagnostics).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.handled_ids().count(), 0);
    }
}
