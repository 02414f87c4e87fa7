// In crates/app-config/src/types.rs

use core_types::StrategyConfig;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

// --- Structs for pairs.toml Configuration ---

/// The top-level configuration for an evaluation run: every tradable pair.
#[derive(Deserialize, Debug, Clone)]
pub struct PairsConfig {
    #[serde(rename = "pairs")]
    pub pair_configs: Vec<PairConfig>,
}

/// Configuration for a single symbol-strategy pair.
#[derive(Deserialize, Debug, Clone)]
pub struct PairConfig {
    pub symbol: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub strategy: StrategyConfig,
}

fn default_enabled() -> bool {
    true
}
