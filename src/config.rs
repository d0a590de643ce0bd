use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the module view machine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModuleViewConfig {
    /// Warn on dispatches with no entry in the transition table.
    ///
    /// The table treats unmapped (view, event) pairs as identity in every
    /// build; strict mode surfaces them in the logs so dead dispatches can be
    /// spotted during development.
    pub strict_transitions: bool,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when the environment does not set a filter
    pub log_level: String,
    /// Emit logs as JSON rather than human-readable lines
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: true,
        }
    }
}

impl Default for ModuleViewConfig {
    fn default() -> Self {
        Self {
            strict_transitions: false,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ModuleViewConfig {
    /// Load configuration with precedence:
    /// 1. Default values
    /// 2. Configuration file (module-view.toml)
    /// 3. Environment variables (prefixed with MODULE_VIEW_)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("module-view.toml").exists() {
            builder = builder.add_source(File::with_name("module-view"));
        }

        builder = builder.add_source(
            Environment::with_prefix("MODULE_VIEW")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

/// Initialize configuration (called at session start)
pub fn init_config() -> Result<ModuleViewConfig> {
    let config = ModuleViewConfig::load()?;
    tracing::info!(strict = %config.strict_transitions, "Configuration loaded successfully");
    Ok(config)
}
