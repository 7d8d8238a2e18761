//! `validate` command implementation.

use anyhow::Result;
use serde_json::json;
use tracing::info;

use config_loader::ConfigLoader;

use crate::cli::ValidateArgs;

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let result = ConfigLoader::load_from_path(&args.scenario);

    if args.json {
        let report = match &result {
            Ok(scenario) => json!({
                "valid": true,
                "scenario": args.scenario.display().to_string(),
                "packets": scenario.source.packets.len(),
                "interval_ms": scenario.source.interval_ms,
                "fault_injection": scenario.dispatcher.fault_injection,
            }),
            Err(e) => json!({
                "valid": false,
                "scenario": args.scenario.display().to_string(),
                "error": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    match result {
        Ok(scenario) => {
            info!(
                scenario = %args.scenario.display(),
                packets = scenario.source.packets.len(),
                "Scenario is valid"
            );
            if !args.json {
                println!("OK: {} is valid", args.scenario.display());
            }
            Ok(())
        }
        Err(e) => {
            if !args.json {
                eprintln!("INVALID: {e}");
            }
            Err(e.into())
        }
    }
}
