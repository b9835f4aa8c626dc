//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Calculation engine configuration.
    #[serde(default)]
    pub engine: EngineSettings,
}

/// Calculation engine configuration.
///
/// Every field is optional: `None` means "use the compiled-in default".
/// The engine crate merges these over its built-in commission policy, so a
/// deployment can re-rate a channel or extend the direct-channel set without
/// a rebuild.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// Global fallback commission rate (fraction, e.g. `0.15`).
    pub default_commission_rate: Option<Decimal>,
    /// Channel names treated as direct (zero commission), replacing the
    /// built-in set when present.
    pub direct_channels: Option<Vec<String>>,
    /// Per-channel default commission rates, replacing the built-in table
    /// when present. Keys are matched case-insensitively.
    pub channel_rates: Option<HashMap<String, Decimal>>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layering: `config/default.toml`, then `config/{RUN_MODE}.toml`, then
    /// environment variables prefixed `INNSIGHT__`. All layers are optional;
    /// with nothing present every setting falls back to its compiled-in
    /// default.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("INNSIGHT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
