use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::{ConnectionPolicy, StoreOptions};

pub const DEFAULT_DATABASE_FILE: &str = "my_vector_database.db";
pub const DEFAULT_PORT: u16 = 8000;

const CONFIG_HEADER: &str = "# vecstore configuration; command-line flags override these values\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VecstoreConfig {
    pub database: Option<String>,
    pub port: Option<u16>,
    pub busy_timeout_secs: Option<u64>,
    pub connection: Option<ConnectionPolicy>,
}

impl VecstoreConfig {
    /// Config written by `vecstore init`
    pub fn starter() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE_FILE.to_string()),
            port: Some(DEFAULT_PORT),
            busy_timeout_secs: Some(crate::storage::sqlite::DEFAULT_BUSY_TIMEOUT.as_secs()),
            connection: Some(ConnectionPolicy::Persistent),
        }
    }

    /// Database path: CLI flag, then config, then the built-in default
    pub fn database_path(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }

    pub fn port(&self, flag: Option<u16>) -> u16 {
        flag.or(self.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn store_options(&self, policy_flag: Option<ConnectionPolicy>) -> StoreOptions {
        let defaults = StoreOptions::default();
        StoreOptions {
            policy: policy_flag.or(self.connection).unwrap_or(defaults.policy),
            busy_timeout: self
                .busy_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.busy_timeout),
        }
    }

    /// Load `path` (or `./vecstore.toml`). A missing file means every value
    /// falls back to its built-in default.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;

        tracing::debug!(
            "Loaded config from {}: database={}, port={}, connection={}",
            path.display(),
            config.database_path(None).display(),
            config.port(None),
            config.store_options(None).policy
        );
        Ok(config)
    }

    /// Write this config as TOML, refusing to replace an existing file unless `force`
    pub fn write(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        if path.exists() && !force {
            anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
        }
        self.validate()?;

        let contents = format!("{}{}", CONFIG_HEADER, toml::to_string_pretty(self)?);
        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        tracing::debug!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Resolve the database path and create its parent directory if needed
    pub fn prepare_database(&self, flag: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = self.database_path(flag);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
                tracing::info!("Created database directory {}", parent.display());
            }
        }
        Ok(path)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.port == Some(0) {
            anyhow::bail!("port must be between 1 and 65535");
        }
        if self.database.as_deref().is_some_and(|db| db.trim().is_empty()) {
            anyhow::bail!("database path must not be empty");
        }
        Ok(())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("vecstore.toml")
}
