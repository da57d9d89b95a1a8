use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid PORT value {0:?}")]
    InvalidPort(String),
}

/// Runtime configuration, read once at startup. `MODEL_PATH` points at the
/// TorchScript detection artifact; `HOST`/`PORT` default to serving on all
/// interfaces at 5000.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub model_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let model_path = env::var("MODEL_PATH")
            .map_err(|_| ConfigError::MissingVar("MODEL_PATH"))?
            .into();
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => 5000,
        };

        Ok(Self {
            model_path,
            host,
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
