use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_DATA_FILE: &str = "data/data.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Path of the JSON array file holding every record.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file() }
    }
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }
fn default_data_file() -> String { DEFAULT_DATA_FILE.to_string() }

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content).map_err(|e| anyhow!("invalid config file {}: {}", path, e))
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<std::io::Error>()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, environment otherwise; always normalized.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_and_validate_from(&path)
    }

    /// Only a missing file falls back to the environment; a file that exists
    /// but cannot be read or parsed is an error.
    pub fn load_and_validate_from(path: &str) -> Result<Self> {
        let mut cfg = match load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_env(),
            Err(e) => return Err(e.context(format!("cannot load config file {}", path))),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build from `SERVER_HOST`, `SERVER_PORT` and `DATA_FILE`, falling back to defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());
        Self {
            server: ServerConfig { host, port },
            storage: StorageConfig { data_file },
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file is empty; set it in config.toml or DATA_FILE"));
        }
        Ok(())
    }
}
