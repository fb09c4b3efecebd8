use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::error::{AppError, Result};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";

/// Process-wide settings, loaded once at startup and handed to the
/// fetcher and generator constructors by reference.
#[derive(Clone)]
pub struct Config {
    /// Raw `HOST`/`PORT`; only the server binary parses them.
    pub host: String,
    pub port: String,
    /// Only required when fetching live profiles.
    pub scrapin_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Left out of requests when unset.
    pub openai_temperature: Option<f32>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup so tests never
    /// have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_temperature = var("OPENAI_TEMPERATURE")
            .map(|raw| {
                raw.parse::<f32>().map_err(|e| {
                    AppError::ConfigError(format!("Invalid OPENAI_TEMPERATURE {raw:?}: {e}"))
                })
            })
            .transpose()?;

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT").unwrap_or_else(|| "3000".to_string()),
            scrapin_api_key: var("SCRAPIN_API_KEY"),
            openai_api_key: var("OPENAI_API_KEY"),
            openai_base_url: var("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            openai_temperature,
        })
    }

    pub fn server_addr(&self) -> Result<SocketAddr> {
        let port = self
            .port
            .parse::<u16>()
            .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&self.host)
            .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(SocketAddr::new(ip, port))
    }

    pub fn masked_openai_key(&self) -> String {
        self.openai_api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "not set".to_string())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("scrapin_api_key", &self.scrapin_api_key.as_deref().map(mask_secret))
            .field("openai_api_key", &self.openai_api_key.as_deref().map(mask_secret))
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("openai_temperature", &self.openai_temperature)
            .finish()
    }
}

/// Keeps the first four characters so a key can be recognised in output.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
