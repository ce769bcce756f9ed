use super::{
    ConfigError, DatabaseConfig, LoggingConfig, LookupConfig, ResolversConfig, ServerConfig,
};
use crate::resolver::ResolverEndpoint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration, loaded from TOML and then overridden from the command line.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub lookup: LookupConfig,

    #[serde(default)]
    pub resolvers: ResolversConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line. `None`/empty leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub custom_resolvers: Vec<String>,
    pub concurrency: Option<usize>,
    pub limit: Option<usize>,
    pub query_timeout: Option<u64>,
    pub debug: bool,
}

impl Config {
    /// Loads `config_path` (defaults when `None`) and applies `overrides`.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(database) = overrides.database {
            self.database.path = database;
        }
        if !overrides.custom_resolvers.is_empty() {
            self.resolvers.custom = overrides.custom_resolvers;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.lookup.concurrency = concurrency;
        }
        if let Some(limit) = overrides.limit {
            self.lookup.limit = limit;
        }
        if let Some(timeout) = overrides.query_timeout {
            self.lookup.query_timeout = timeout;
        }
        if overrides.debug {
            self.logging.level = "debug".to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "lookup.concurrency must be at least 1".into(),
            ));
        }
        if self.lookup.limit == 0 {
            return Err(ConfigError::Invalid("lookup.limit must be at least 1".into()));
        }
        if self.lookup.query_timeout == 0 {
            return Err(ConfigError::Invalid(
                "lookup.query_timeout must be greater than 0".into(),
            ));
        }

        for addr in &self.resolvers.custom {
            addr.parse::<ResolverEndpoint>()
                .map_err(ConfigError::Invalid)?;
        }
        for group in &self.resolvers.groups {
            if group.name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "resolver group name cannot be empty".into(),
                ));
            }
            if group.servers.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "resolver group '{}' has no servers",
                    group.name
                )));
            }
            for addr in &group.servers {
                addr.parse::<ResolverEndpoint>()
                    .map_err(ConfigError::Invalid)?;
            }
        }
        Ok(())
    }
}
