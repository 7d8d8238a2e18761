//! # Config Loader
//!
//! Scenario configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON scenario files
//! - Validate configuration legality
//! - Generate `Scenario`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let scenario = ConfigLoader::load_from_path(Path::new("scenario.toml")).unwrap();
//! println!("Packets: {}", scenario.source.packets.len());
//! ```

mod parser;
mod scenario;
mod validator;

pub use parser::ConfigFormat;
pub use scenario::{
    AuditConfig, AuditSinkKind, DispatcherConfig, PacketSpec, Scenario, SourceConfig,
};

use contracts::ContractError;
use std::path::Path;

/// Scenario loader
///
/// Provides static methods to load a scenario from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a scenario from a file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<Scenario, ContractError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load a scenario from a string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<Scenario, ContractError> {
        let scenario = parser::parse(content, format)?;
        validator::validate(&scenario)?;
        Ok(scenario)
    }

    /// Serialize a Scenario to a TOML string
    pub fn to_toml(scenario: &Scenario) -> Result<String, ContractError> {
        toml::to_string_pretty(scenario)
            .map_err(|e| ContractError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a Scenario to a JSON string
    pub fn to_json(scenario: &Scenario) -> Result<String, ContractError> {
        serde_json::to_string_pretty(scenario)
            .map_err(|e| ContractError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ContractError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ContractError::config_parse("cannot determine file format from extension")
        })?;

        match ext.to_ascii_lowercase().as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            other => Err(ContractError::config_parse(format!(
                "unsupported config format: .{other}"
            ))),
        }
    }

    fn read_file(path: &Path) -> Result<String, ContractError> {
        std::fs::read_to_string(path).map_err(|e| ContractError::ConfigParse {
            message: format!("cannot read '{}'", path.display()),
            source: Some(Box::new(e)),
        })
    }
}
