//! `run` command implementation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use config_loader::{AuditSinkKind, ConfigLoader, Scenario};
use contracts::{DiagnosticSink, PacketAuditSink, PacketHandler, PacketId};
use dispatcher::{DispatcherBuilder, JsonlAuditSink, LogAuditSink, PacketDispatcher};
use handlers::{HeartbeatHandler, StatusHandler, TelemetryHandler};
use observability::TracingDiagnostics;
use sources::{ScriptedSource, ScriptedSourceConfig};

use crate::cli::RunArgs;
use crate::pipeline;

/// Execute the `run` command
pub async fn run_scenario(args: &RunArgs) -> Result<()> {
    let mut scenario = load_scenario(args)?;

    // Apply CLI overrides
    if let Some(interval_ms) = args.interval_ms {
        info!(interval_ms, "Overriding packet interval from CLI");
        scenario.source.interval_ms = interval_ms;
    }

    info!(
        packets = scenario.source.packets.len(),
        interval_ms = scenario.source.interval_ms,
        fault_injection = ?scenario.dispatcher.fault_injection,
        audit_sink = ?scenario.audit.sink,
        "Scenario loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - scenario is valid, exiting");
        print_scenario_summary(&scenario);
        return Ok(());
    }

    // Initialize Metrics (optional)
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!("Metrics endpoint available on port {}", args.metrics_port);
    }

    // Wire the pipeline: diagnostics, audit sink, handlers, dispatcher, source
    let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(TracingDiagnostics::new());
    let audit = build_audit_sink(&scenario)?;

    let dispatcher = build_dispatcher(&scenario, &diagnostics, &audit)?;
    info!(routes = dispatcher.route_count(), "Dispatcher ready");

    let source = ScriptedSource::new(
        ScriptedSourceConfig {
            name: "scripted".to_string(),
            interval: Duration::from_millis(scenario.source.interval_ms),
        },
        scenario.source.packets.iter().map(|spec| spec.to_packet()),
    );

    // Setup graceful shutdown handler
    let cancel = CancellationToken::new();
    let shutdown_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        warn!("Received shutdown signal, stopping driver...");
        shutdown_cancel.cancel();
    });

    info!("Starting driver loop...");

    let stats = pipeline::drive(source, &dispatcher, &diagnostics, &audit, &cancel).await;

    stats.print_summary(&dispatcher.metrics().snapshot());

    info!("Packet Router finished");
    Ok(())
}

/// Load the scenario from file, or the built-in reference script.
fn load_scenario(args: &RunArgs) -> Result<Scenario> {
    if args.builtin {
        info!("Using built-in reference scenario");
        return Ok(Scenario::reference());
    }

    if !args.scenario.exists() {
        anyhow::bail!("Scenario file not found: {}", args.scenario.display());
    }

    ConfigLoader::load_from_path(&args.scenario)
        .with_context(|| format!("Failed to load scenario from {}", args.scenario.display()))
}

/// Build the dispatcher for the demo handler set.
fn build_dispatcher(
    scenario: &Scenario,
    diagnostics: &Arc<dyn DiagnosticSink>,
    audit: &Arc<dyn PacketAuditSink>,
) -> Result<PacketDispatcher> {
    let handler_set: Vec<Arc<dyn PacketHandler>> = vec![
        Arc::new(HeartbeatHandler::new(Arc::clone(diagnostics))),
        Arc::new(TelemetryHandler::new(Arc::clone(diagnostics))),
        Arc::new(StatusHandler::new(Arc::clone(diagnostics))),
    ];

    let mut builder = DispatcherBuilder::new().register_all(handler_set);
    if let Some(id) = scenario.dispatcher.fault_injection {
        builder = builder.inject_fault(PacketId::new(id));
    }

    builder
        .build(Arc::clone(diagnostics), Arc::clone(audit))
        .context("Failed to build dispatcher")
}

/// Build the audit sink selected by the scenario.
fn build_audit_sink(scenario: &Scenario) -> Result<Arc<dyn PacketAuditSink>> {
    match scenario.audit.sink {
        AuditSinkKind::Log => Ok(Arc::new(LogAuditSink::new("audit_log"))),
        AuditSinkKind::Jsonl => {
            // Validation guarantees the path is present
            let path = scenario
                .audit
                .path
                .as_ref()
                .context("jsonl audit sink requires a path")?;
            let sink = JsonlAuditSink::new("audit_jsonl", path)
                .with_context(|| format!("Failed to open audit file {}", path.display()))?;
            Ok(Arc::new(sink))
        }
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print scenario summary for dry-run mode
fn print_scenario_summary(scenario: &Scenario) {
    println!("\n=== Scenario Summary ===\n");
    println!("Source:");
    println!("  Packets scripted: {}", scenario.source.packets.len());
    println!("  Interval: {}ms", scenario.source.interval_ms);

    println!("\nPacket script:");
    for (index, spec) in scenario.source.packets.iter().enumerate() {
        println!(
            "  {:>3}. id={} kind={} payload={} bytes",
            index + 1,
            spec.id,
            spec.kind.as_deref().unwrap_or("data"),
            spec.payload.len()
        );
    }

    println!("\nDispatcher:");
    match scenario.dispatcher.fault_injection {
        Some(id) => println!("  Fault injection: packet id {id}"),
        None => println!("  Fault injection: disabled"),
    }

    println!("\nAudit:");
    match scenario.audit.sink {
        AuditSinkKind::Log => println!("  Sink: log"),
        AuditSinkKind::Jsonl => println!(
            "  Sink: jsonl ({})",
            scenario
                .audit
                .path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        ),
    }

    println!();
}
