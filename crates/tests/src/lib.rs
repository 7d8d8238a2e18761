//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 参考场景端到端回放（无外部依赖）
//! - 故障隔离与审计行为验证

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use config_loader::Scenario;
    use contracts::{
        AuditReason, ContractError, CorrelationId, Diagnostic, DiagnosticLevel, DiagnosticSink,
        Packet, PacketAuditSink, PacketHandler, PacketId, PacketSource,
    };
    use dispatcher::{DispatcherBuilder, PacketDispatcher};
    use handlers::{HeartbeatHandler, StatusHandler, TelemetryHandler};
    use sources::{ScriptedSource, ScriptedSourceConfig};
    use tokio_util::sync::CancellationToken;

    /// Diagnostic recorder: counts info records per packet id and keeps
    /// error records for inspection.
    #[derive(Default)]
    struct RecordingDiagnostics {
        infos: Mutex<Vec<PacketId>>,
        errors: Mutex<Vec<(String, Option<CorrelationId>)>>,
    }

    impl RecordingDiagnostics {
        fn infos_for(&self, id: u32) -> usize {
            self.infos
                .lock()
                .unwrap()
                .iter()
                .filter(|&&p| p == PacketId::new(id))
                .count()
        }

        fn error_count(&self) -> usize {
            self.errors.lock().unwrap().len()
        }
    }

    impl DiagnosticSink for RecordingDiagnostics {
        fn emit(&self, diagnostic: Diagnostic<'_>) {
            match diagnostic.level {
                DiagnosticLevel::Info => {
                    if let Some(id) = diagnostic.packet_id {
                        self.infos.lock().unwrap().push(id);
                    }
                }
                DiagnosticLevel::Error => {
                    self.errors
                        .lock()
                        .unwrap()
                        .push((diagnostic.message.to_string(), diagnostic.correlation_id));
                }
                _ => {}
            }
        }
    }

    #[derive(Default)]
    struct RecordingAuditSink {
        records: Mutex<Vec<(AuditReason, CorrelationId, PacketId)>>,
    }

    #[async_trait]
    impl PacketAuditSink for RecordingAuditSink {
        fn name(&self) -> &str {
            "recording"
        }

        async fn record(
            &self,
            reason: AuditReason,
            correlation_id: CorrelationId,
            packet: &Packet,
        ) -> Result<(), ContractError> {
            self.records
                .lock()
                .unwrap()
                .push((reason, correlation_id, packet.id));
            Ok(())
        }
    }

    struct Fixture {
        dispatcher: PacketDispatcher,
        diagnostics: Arc<RecordingDiagnostics>,
        audit: Arc<RecordingAuditSink>,
    }

    fn build_fixture(scenario: &Scenario) -> Fixture {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let audit = Arc::new(RecordingAuditSink::default());
        let diagnostics_dyn = Arc::clone(&diagnostics) as Arc<dyn DiagnosticSink>;
        let audit_dyn = Arc::clone(&audit) as Arc<dyn PacketAuditSink>;

        let handler_set: Vec<Arc<dyn PacketHandler>> = vec![
            Arc::new(HeartbeatHandler::new(Arc::clone(&diagnostics_dyn))),
            Arc::new(TelemetryHandler::new(Arc::clone(&diagnostics_dyn))),
            Arc::new(StatusHandler::new(Arc::clone(&diagnostics_dyn))),
        ];

        let mut builder = DispatcherBuilder::new().register_all(handler_set);
        if let Some(id) = scenario.dispatcher.fault_injection {
            builder = builder.inject_fault(PacketId::new(id));
        }
        let dispatcher = builder.build(diagnostics_dyn, audit_dyn).unwrap();

        Fixture {
            dispatcher,
            diagnostics,
            audit,
        }
    }

    fn scripted(scenario: &Scenario) -> ScriptedSource {
        ScriptedSource::new(
            ScriptedSourceConfig {
                name: "e2e".to_string(),
                interval: Duration::from_millis(1),
            },
            scenario.source.packets.iter().map(|spec| spec.to_packet()),
        )
    }

    /// The driver loop, as the CLI runs it: sequential pulls, dispatcher
    /// faults isolated per packet.
    async fn drive(
        mut source: ScriptedSource,
        fixture: &Fixture,
        cancel: &CancellationToken,
    ) -> u64 {
        let mut pulled = 0;
        while let Some(packet) = source.next(cancel).await {
            if cancel.is_cancelled() {
                break;
            }
            pulled += 1;
            if let Err(e) = fixture.dispatcher.dispatch(&packet, cancel).await {
                let correlation_id = CorrelationId::fresh();
                fixture.diagnostics.emit(
                    Diagnostic::error("Dispatcher fault while dispatching packet")
                        .with_correlation(correlation_id)
                        .with_packet(packet.id, &packet.kind)
                        .with_cause(&e),
                );
                fixture
                    .audit
                    .record(AuditReason::Error, correlation_id, &packet)
                    .await
                    .unwrap();
            }
        }
        pulled
    }

    /// Reference scenario end-to-end: ids [1,2,3,4,2,5,2(bad),3,2,1]
    /// through handlers for 1/2/3, fault injected on 5.
    #[tokio::test]
    async fn test_reference_scenario_end_to_end() {
        let scenario = Scenario::reference();
        let fixture = build_fixture(&scenario);
        let cancel = CancellationToken::new();

        let pulled = drive(scripted(&scenario), &fixture, &cancel).await;
        assert_eq!(pulled, 10);

        // Exactly three audited packets: the unroutable id 4, the
        // dispatcher fault on id 5 (caught by the driver), and the
        // undecodable telemetry payload on id 2.
        let records = fixture.audit.records.lock().unwrap().clone();
        let audited_ids: Vec<u32> = records.iter().map(|(_, _, id)| id.value()).collect();
        assert_eq!(audited_ids, vec![4, 5, 2]);
        assert!(records.iter().all(|(reason, _, _)| *reason == AuditReason::Error));

        // Each failure got its own correlation id
        let unique: HashSet<_> = records.iter().map(|(_, cid, _)| *cid).collect();
        assert_eq!(unique.len(), 3);

        // One error diagnostic per audited packet
        assert_eq!(fixture.diagnostics.error_count(), 3);

        // Ordinary packets reached their handlers and succeeded silently
        assert_eq!(fixture.diagnostics.infos_for(1), 2);
        assert_eq!(fixture.diagnostics.infos_for(3), 2);
        // Telemetry: four invocations, three accepted readings
        assert_eq!(fixture.diagnostics.infos_for(2), 3);

        let snapshot = fixture.dispatcher.metrics().snapshot();
        assert_eq!(snapshot.handled, 7);
        assert_eq!(snapshot.handler_failures, 1);
        assert_eq!(snapshot.routing_misses, 1);
        assert_eq!(snapshot.internal_faults, 1);
    }

    #[tokio::test]
    async fn test_pre_cancelled_run_does_nothing() {
        let scenario = Scenario::reference();
        let fixture = build_fixture(&scenario);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let pulled = drive(scripted(&scenario), &fixture, &cancel).await;

        assert_eq!(pulled, 0);
        assert!(fixture.audit.records.lock().unwrap().is_empty());
        assert_eq!(fixture.diagnostics.error_count(), 0);
    }

    #[tokio::test]
    async fn test_mid_run_cancellation_stops_promptly() {
        let scenario = Scenario::reference();
        let fixture = build_fixture(&scenario);
        let cancel = CancellationToken::new();

        // Cancel while the source is waiting between packets
        let canceller = cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            canceller.cancel();
        });

        let source = ScriptedSource::new(
            ScriptedSourceConfig {
                name: "e2e".to_string(),
                interval: Duration::from_secs(60),
            },
            scenario.source.packets.iter().map(|spec| spec.to_packet()),
        );

        let pulled = drive(source, &fixture, &cancel).await;
        handle.await.unwrap();

        // The 60s delay never elapsed: cancellation ended the pull
        assert_eq!(pulled, 0);
    }

    /// Duplicate registration must fail before any dispatch is possible.
    #[tokio::test]
    async fn test_duplicate_handler_set_cannot_start() {
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let audit = Arc::new(RecordingAuditSink::default());
        let diagnostics_dyn = Arc::clone(&diagnostics) as Arc<dyn DiagnosticSink>;

        let result = DispatcherBuilder::new()
            .register(Arc::new(TelemetryHandler::new(Arc::clone(&diagnostics_dyn))))
            .register(Arc::new(TelemetryHandler::new(Arc::clone(&diagnostics_dyn))))
            .build(diagnostics_dyn, audit as Arc<dyn PacketAuditSink>);

        assert!(result.is_err());
        assert_eq!(diagnostics.error_count(), 1);
    }

    /// A counter used to prove invocation independence across repeats.
    struct CountingHandler {
        invocations: Arc<AtomicU64>,
    }

    #[async_trait]
    impl PacketHandler for CountingHandler {
        fn name(&self) -> &str {
            "counting"
        }

        fn handled_id(&self) -> PacketId {
            PacketId::new(7)
        }

        async fn process(
            &self,
            _packet: &Packet,
            _cancel: &CancellationToken,
        ) -> Result<(), ContractError> {
            self.invocations.fetch_add(1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_same_packet_twice_is_two_invocations() {
        let invocations = Arc::new(AtomicU64::new(0));
        let diagnostics = Arc::new(RecordingDiagnostics::default());
        let audit = Arc::new(RecordingAuditSink::default());

        let dispatcher = DispatcherBuilder::new()
            .register(Arc::new(CountingHandler {
                invocations: Arc::clone(&invocations),
            }))
            .build(
                diagnostics as Arc<dyn DiagnosticSink>,
                audit as Arc<dyn PacketAuditSink>,
            )
            .unwrap();

        let cancel = CancellationToken::new();
        let packet = Packet::new(PacketId::new(7), vec![1u8]);
        dispatcher.dispatch(&packet, &cancel).await.unwrap();
        dispatcher.dispatch(&packet, &cancel).await.unwrap();

        assert_eq!(invocations.load(Ordering::Relaxed), 2);
    }
}
