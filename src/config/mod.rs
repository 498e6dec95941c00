//! Configuration loading and management
//!
//! The service reads one YAML document; every section and field is optional:
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:8080
//! uploads:
//!   root: /var/lib/storefront/public
//!   brands: brands
//!   categories: images/categories
//!   max_bytes: 2097152
//! storage:
//!   backend: mongodb
//!   uri: mongodb://localhost:27017
//!   database: storefront
//!   seed: ./seed.json
//! ```
//!
//! `STOREFRONT_BIND` and `STOREFRONT_UPLOAD_ROOT` override the matching
//! fields after the file is read.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};

/// Environment variable naming the config file to load
pub const CONFIG_PATH_VAR: &str = "STOREFRONT_CONFIG";
pub const BIND_VAR: &str = "STOREFRONT_BIND";
pub const UPLOAD_ROOT_VAR: &str = "STOREFRONT_UPLOAD_ROOT";

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Where uploaded logos are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub root: PathBuf,
    /// Brand logo directory, relative to `root`
    pub brands: String,
    /// Category logo directory, relative to `root`
    pub categories: String,
    /// Largest accepted upload
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
            brands: "brands".to_string(),
            categories: "images/categories".to_string(),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Connection string, required for `mongodb`
    pub uri: Option<String>,
    pub database: String,
    /// JSON file of brands, categories and products loaded at startup
    pub seed: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: None,
            database: "storefront".to_string(),
            seed: None,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply overrides from `lookup` (environment variables in production)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup(BIND_VAR) {
            self.server.bind = bind;
        }
        if let Some(root) = lookup(UPLOAD_ROOT_VAR) {
            self.uploads.root = PathBuf::from(root);
        }
        self
    }

    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// The address to bind, parsed
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind".to_string(),
                value: self.server.bind.clone(),
                message: e.to_string(),
            })
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        for (field, dir) in [
            ("uploads.brands", &self.uploads.brands),
            ("uploads.categories", &self.uploads.categories),
        ] {
            let relative = Path::new(dir)
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
            if dir.is_empty() || !relative {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: dir.clone(),
                    message: "must be a relative path below uploads.root".to_string(),
                });
            }
        }

        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "uploads.max_bytes".to_string(),
                value: "0".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Mongodb && self.storage.uri.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "storage.uri".to_string(),
                value: String::new(),
                message: "required when storage.backend is mongodb".to_string(),
            });
        }

        Ok(())
    }

    /// Load the file named by `STOREFRONT_CONFIG` (defaults when unset),
    /// apply environment overrides and validate
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        }
        .with_env_overrides();

        config.validate()?;
        Ok(config)
    }
}
