use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const ENV_PREFIX: &str = "CUSTOMER_MANAGER";

#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub log: LogSettings,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LogSettings {
    pub level: String,
}

impl Settings {
    /// Defaults, then `customer-manager.toml` if present, then
    /// `CUSTOMER_MANAGER__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    pub fn load_with(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("log.level", "info")?
            .add_source(File::with_name("customer-manager").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
