//! Scenario parsing (TOML / JSON)

use contracts::ContractError;

use crate::scenario::Scenario;

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

/// Parse scenario content in the given format.
pub(crate) fn parse(content: &str, format: ConfigFormat) -> Result<Scenario, ContractError> {
    match format {
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| ContractError::ConfigParse {
            message: "TOML parse error".to_string(),
            source: Some(Box::new(e)),
        }),
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
                message: "JSON parse error".to_string(),
                source: Some(Box::new(e)),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json() {
        let content = r#"{
            "source": {
                "interval_ms": 100,
                "packets": [{ "id": 1, "payload": [1, 2, 3] }]
            }
        }"#;

        let scenario = parse(content, ConfigFormat::Json).unwrap();
        assert_eq!(scenario.source.interval_ms, 100);
        assert!(scenario.dispatcher.fault_injection.is_none());
    }

    #[test]
    fn test_parse_toml_defaults() {
        let content = r#"
            [source]
            interval_ms = 100

            [[source.packets]]
            id = 7
        "#;

        let scenario = parse(content, ConfigFormat::Toml).unwrap();
        assert!(scenario.source.packets[0].payload.is_empty());
        assert!(scenario.source.packets[0].kind.is_none());
    }

    #[test]
    fn test_parse_error_is_config_parse() {
        let result = parse("not a scenario", ConfigFormat::Toml);
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }
}
