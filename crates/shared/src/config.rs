//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ledger configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Ledger configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Initial capacity of the per-account lock registry.
    #[serde(default = "default_guard_capacity")]
    pub guard_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            guard_capacity: default_guard_capacity(),
        }
    }
}

fn default_guard_capacity() -> usize {
    64
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, in order of precedence: `config/default`, `config/{RUN_MODE}`,
    /// then environment variables prefixed with `TALLY__`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
