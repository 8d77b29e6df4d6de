use config::{ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use wayfarer_shared::Secret;

const ENV_PREFIX: &str = "WAYFARER";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub mail: MailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Log and accept every message
    Log,
    SendGrid,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    pub provider: ProviderKind,
    pub sendgrid_api_key: Option<Secret<String>>,
    #[serde(default = "default_sendgrid_endpoint")]
    pub sendgrid_endpoint: String,
}

fn default_sendgrid_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_string()
}

impl Config {
    /// `config/` relative to the working directory, mode from `RUN_MODE`
    pub fn load() -> Result<Self, ConfigError> {
        let mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &mode)
    }

    /// Layers `default`, then `<mode>` and `local` if present, then
    /// `WAYFARER__SECTION__KEY` variables. Later layers win.
    pub fn load_from(dir: &Path, mode: &str) -> Result<Self, ConfigError> {
        let layer = |name: &str| File::from(dir.join(name));

        config::Config::builder()
            .add_source(layer("default"))
            .add_source(layer(mode).required(false))
            .add_source(layer("local").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }
}
