//! Process-wide document store handle.
//!
//! One client is created at startup and shared for the process lifetime;
//! the driver multiplexes its internal connection pool across requests.
//! Connection establishment uses a fixed timeout; there is no per-request
//! cancellation.

use std::time::Duration;

use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

/// Errors raised while setting up the store handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string or options were rejected.
    #[error("invalid store configuration: {message}")]
    Configuration { message: String },
}

impl StoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

/// Configuration for the document store connection.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    uri: String,
    database: String,
    connect_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration with the default 10 second connect timeout.
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Override the connection-establishment timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

/// Shared handle to the application database.
#[derive(Clone)]
pub struct DocumentStore {
    database: Database,
}

impl DocumentStore {
    /// Parse the connection string and build the process-wide client.
    ///
    /// The driver connects lazily; an unreachable store surfaces as a
    /// connection error on first use, not here.
    pub async fn connect(config: StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(config.uri())
            .await
            .map_err(|err| StoreError::configuration(err.to_string()))?;
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        let client =
            Client::with_options(options).map_err(|err| StoreError::configuration(err.to_string()))?;
        let database = client.database(config.database());
        Ok(Self { database })
    }

    /// Typed collection accessor for repository adapters.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_connect_timeout() {
        let config = StoreConfig::new("mongodb://localhost:27017", "shelfmark");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.database(), "shelfmark");
    }

    #[test]
    fn config_builder_overrides_timeout() {
        let config = StoreConfig::new("mongodb://localhost:27017", "shelfmark")
            .with_connect_timeout(Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }
}
