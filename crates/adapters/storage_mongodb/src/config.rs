//! MongoDB connection configuration, resolved from environment variables.

use std::time::Duration;

use mongodb::options::{ClientOptions, Credential, ServerAddress};

/// Connection descriptor for the MongoDB adapter.
///
/// Every field has a local-development default so a bare environment works
/// against `mongodb://localhost:27017/devkeep`. When `uri` is set it takes
/// precedence over the host/port/credential fields.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Full connection string override (e.g. `mongodb+srv://…`).
    pub uri: Option<String>,
    pub host: String,
    pub port: u16,
    /// Database holding the `devices` collection.
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub max_pool_size: u32,
    /// How long server selection may take before an operation fails.
    pub server_selection_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: None,
            host: "localhost".to_string(),
            port: 27017,
            database: "devkeep".to_string(),
            username: None,
            password: None,
            max_pool_size: 10,
            server_selection_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Failure reading the adapter configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DEVKEEP_MONGODB_PORT is not a valid port number: {value:?}")]
    InvalidPort { value: String },

    #[error("DEVKEEP_MONGODB_MAX_POOL_SIZE is not a valid pool size: {value:?}")]
    InvalidPoolSize { value: String },
}

impl MongoConfig {
    /// Read configuration from `DEVKEEP_MONGODB_*` environment variables,
    /// falling back to defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a numeric variable is set but does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(uri) = std::env::var("DEVKEEP_MONGODB_URI") {
            config.uri = Some(uri);
        }
        if let Ok(host) = std::env::var("DEVKEEP_MONGODB_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("DEVKEEP_MONGODB_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value: port })?;
        }
        if let Ok(database) = std::env::var("DEVKEEP_MONGODB_DATABASE") {
            config.database = database;
        }
        config.username = std::env::var("DEVKEEP_MONGODB_USERNAME").ok();
        config.password = std::env::var("DEVKEEP_MONGODB_PASSWORD").ok();
        if let Ok(size) = std::env::var("DEVKEEP_MONGODB_MAX_POOL_SIZE") {
            config.max_pool_size = size
                .parse()
                .map_err(|_| ConfigError::InvalidPoolSize { value: size })?;
        }
        Ok(config)
    }

    /// Build driver options from the host/port/credential fields.
    ///
    /// Credentials authenticate against the `admin` source, matching the
    /// deployment's user setup. Only used when [`uri`](Self::uri) is unset.
    pub(crate) fn client_options(&self) -> ClientOptions {
        let mut options = ClientOptions::default();
        options.hosts = vec![ServerAddress::Tcp {
            host: self.host.clone(),
            port: Some(self.port),
        }];
        options.default_database = Some(self.database.clone());
        options.max_pool_size = Some(self.max_pool_size);
        options.server_selection_timeout = Some(self.server_selection_timeout);
        options.connect_timeout = Some(self.connect_timeout);
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(password.clone())
                    .source("admin".to_string())
                    .build(),
            );
        }
        options
    }
}
