//! Configuration for the parser service

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParserConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Session storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Static front-end files
    #[serde(default)]
    pub static_files: StaticConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum parse request body in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

/// Session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding every session
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("parsed_documents").join("server_data.json"),
        }
    }
}

/// Static file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory served for unmatched GET paths
    pub root: PathBuf,
    /// Landing page served at `/`, relative to `root`
    pub index: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: "parser.html".to_string(),
        }
    }
}

impl StaticConfig {
    /// Full path of the landing page
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }
}

impl ParserConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML config text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Override fields from `KRUSHFLOW_*` environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("KRUSHFLOW_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("KRUSHFLOW_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid KRUSHFLOW_PORT '{}': {}", port, e)))?;
        }
        if let Ok(data_file) = env::var("KRUSHFLOW_DATA_FILE") {
            self.storage.data_file = PathBuf::from(data_file);
        }
        if let Ok(static_dir) = env::var("KRUSHFLOW_STATIC_DIR") {
            self.static_files.root = PathBuf::from(static_dir);
        }
        Ok(())
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("server.port must be non-zero".to_string()));
        }
        if self.server.max_upload_size == 0 {
            return Err(Error::Config("server.max_upload_size must be non-zero".to_string()));
        }
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(Error::Config("storage.data_file must not be empty".to_string()));
        }
        Ok(())
    }

    /// Socket address string
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
