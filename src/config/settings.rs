//! User settings for PettyFlow
//!
//! Manages the opening balance of the cash box, display preferences, session
//! lifetime and the AI assistant connection.

use serde::{Deserialize, Serialize};

use super::paths::PettyPaths;
use crate::error::PettyError;
use crate::models::Money;

/// Connection settings for the AI assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Whether AI features are used at all
    #[serde(default = "default_ai_enabled")]
    pub enabled: bool,

    /// Messages endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model identifier sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_ai_enabled() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.anthropic.com/v1/messages".to_string()
}

fn default_model() -> String {
    "claude-3-5-haiku-latest".to_string()
}

fn default_api_key_env() -> String {
    "ANTHROPIC_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            enabled: default_ai_enabled(),
            api_url: default_api_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl AiSettings {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// User settings for PettyFlow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Cash on hand before the first recorded transaction
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Money,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How long a login stays valid
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,

    /// AI assistant connection
    #[serde(default)]
    pub ai: AiSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_initial_balance() -> Money {
    Money::from_major_minor(500, 0)
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_session_ttl_hours() -> i64 {
    24
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            initial_balance: default_initial_balance(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            session_ttl_hours: default_session_ttl_hours(),
            ai: AiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &PettyPaths) -> Result<Self, PettyError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PettyError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PettyError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PettyPaths) -> Result<(), PettyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PettyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PettyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
