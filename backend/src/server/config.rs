//! Process configuration loaded once at startup.

use crate::outbound::identity::{IdentityConfigError, IdentityProviderConfig};

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017";
const DEFAULT_DATABASE: &str = "shelfmark";
const DEFAULT_PORT: u16 = 8080;

/// Errors that make startup impossible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `IDENTITY_CREDENTIALS` is absent; the process cannot authenticate
    /// anyone and exits immediately.
    #[error("IDENTITY_CREDENTIALS must be set to the base64 provider credential blob")]
    MissingCredentials,
    #[error("IDENTITY_CREDENTIALS is unusable: {0}")]
    InvalidCredentials(#[from] IdentityConfigError),
    #[error("PORT must be a valid port number, got {value}")]
    InvalidPort { value: String },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongodb_uri: String,
    pub database: String,
    pub identity: IdentityProviderConfig,
    pub port: u16,
    /// Allowed cross-origin set; empty means same-origin only.
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an injectable lookup, keeping parsing
    /// testable without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mongodb_uri =
            lookup("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_owned());
        let database = lookup("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_owned());

        let blob = lookup("IDENTITY_CREDENTIALS").ok_or(ConfigError::MissingCredentials)?;
        let identity = IdentityProviderConfig::from_base64(&blob)?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            mongodb_uri,
            database,
            identity,
            port,
            allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use std::collections::HashMap;

    fn credentials_blob() -> String {
        STANDARD.encode(r#"{"project_id":"shelfmark-dev","api_key":"AIzaTest"}"#)
    }

    fn lookup_from(entries: &[(&str, String)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_credentials_is_fatal() {
        let error = AppConfig::from_lookup(|_| None).expect_err("credentials required");
        assert_eq!(error, ConfigError::MissingCredentials);
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let lookup = lookup_from(&[("IDENTITY_CREDENTIALS", credentials_blob())]);
        let config = AppConfig::from_lookup(lookup).expect("valid config");
        assert_eq!(config.mongodb_uri, DEFAULT_MONGODB_URI);
        assert_eq!(config.database, DEFAULT_DATABASE);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn origins_split_on_commas_and_trim() {
        let lookup = lookup_from(&[
            ("IDENTITY_CREDENTIALS", credentials_blob()),
            (
                "ALLOWED_ORIGINS",
                "https://shelfmark.app, https://staging.shelfmark.app ,".to_owned(),
            ),
        ]);
        let config = AppConfig::from_lookup(lookup).expect("valid config");
        assert_eq!(
            config.allowed_origins,
            vec![
                "https://shelfmark.app".to_owned(),
                "https://staging.shelfmark.app".to_owned(),
            ]
        );
    }

    #[test]
    fn bad_port_is_rejected() {
        let lookup = lookup_from(&[
            ("IDENTITY_CREDENTIALS", credentials_blob()),
            ("PORT", "eighty".to_owned()),
        ]);
        let error = AppConfig::from_lookup(lookup).expect_err("bad port rejected");
        assert!(matches!(error, ConfigError::InvalidPort { .. }));
    }
}
