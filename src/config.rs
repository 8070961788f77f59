//! Board configuration read from the environment.

use crate::board::adapters::memory::DEFAULT_COLLECTION;
use thiserror::Error;

/// Environment variable naming the tasks collection.
pub const COLLECTION_ENV: &str = "TASKWITH_COLLECTION";
/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_ENV: &str = "TASKWITH_DATABASE_URL";
/// Environment variable holding the connection pool size.
pub const POOL_SIZE_ENV: &str = "TASKWITH_POOL_SIZE";

const DEFAULT_POOL_SIZE: u32 = 4;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to something unusable.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Where tasks live and how to reach them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    /// Name of the tasks collection.
    pub collection: String,
    /// `PostgreSQL` URL; `None` keeps tasks in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_owned(),
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl BoardConfig {
    /// Sets the collection name.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Sets the database URL.
    #[must_use]
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Sets the pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a blank collection name or a
    /// pool size that is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns a variable's value
    /// if set.
    ///
    /// # Errors
    ///
    /// See [`BoardConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(collection) = lookup(COLLECTION_ENV) {
            let trimmed = collection.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidValue {
                    name: COLLECTION_ENV,
                    value: collection,
                });
            }
            config.collection = trimmed.to_owned();
        }

        config.database_url = lookup(DATABASE_URL_ENV)
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty());

        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            config.pool_size = raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: POOL_SIZE_ENV,
                    value: raw,
                })?;
        }

        Ok(config)
    }
}
