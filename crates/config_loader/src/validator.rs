//! Scenario validation

use contracts::ContractError;
use validator::Validate;

use crate::scenario::{AuditSinkKind, Scenario};

/// Validate a parsed scenario.
///
/// Derive-level rules first (field ranges), then the cross-field rules the
/// derive cannot express.
pub(crate) fn validate(scenario: &Scenario) -> Result<(), ContractError> {
    scenario.validate().map_err(|e| {
        let field = e
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "scenario".to_string());
        ContractError::config_validation(field, e.to_string())
    })?;

    if scenario.source.packets.is_empty() {
        return Err(ContractError::config_validation(
            "source.packets",
            "scenario must script at least one packet",
        ));
    }

    if scenario.audit.sink == AuditSinkKind::Jsonl && scenario.audit.path.is_none() {
        return Err(ContractError::config_validation(
            "audit.path",
            "jsonl audit sink requires a record file path",
        ));
    }

    Ok(())
}
