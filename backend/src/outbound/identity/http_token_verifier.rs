//! Reqwest-backed token verification adapter.
//!
//! This adapter owns transport details only: the lookup request against the
//! identity provider, HTTP error mapping, and JSON decoding into a
//! [`VerifiedIdentity`]. The credential blob arrives base64-encoded in the
//! environment and carries the provider project and API key.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenVerifier, TokenVerifierError, VerifiedIdentity};

const DEFAULT_LOOKUP_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1/accounts:lookup";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while decoding the provider credential blob.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityConfigError {
    #[error("credential blob is not valid base64: {message}")]
    Decode { message: String },
    #[error("credential blob is not valid JSON: {message}")]
    Parse { message: String },
}

/// Identity provider project credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityProviderConfig {
    pub project_id: String,
    pub api_key: String,
}

impl IdentityProviderConfig {
    /// Decode the base64-encoded JSON credential blob from the environment.
    pub fn from_base64(blob: &str) -> Result<Self, IdentityConfigError> {
        let bytes = STANDARD
            .decode(blob.trim())
            .map_err(|err| IdentityConfigError::Decode {
                message: err.to_string(),
            })?;
        serde_json::from_slice(&bytes).map_err(|err| IdentityConfigError::Parse {
            message: err.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequestDto<'a> {
    id_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponseDto {
    #[serde(default)]
    users: Vec<ProviderUserDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderUserDto {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
}

/// Token verification adapter performing HTTP lookups against one endpoint.
pub struct HttpTokenVerifier {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpTokenVerifier {
    /// Build an adapter against the provider's default lookup endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: &IdentityProviderConfig) -> Result<Self, reqwest::Error> {
        let endpoint = Url::parse(DEFAULT_LOOKUP_ENDPOINT)
            .unwrap_or_else(|_| unreachable!("default endpoint is a valid URL"));
        Self::with_endpoint(config, endpoint, DEFAULT_TIMEOUT)
    }

    /// Build an adapter against an explicit endpoint, for tests and
    /// self-hosted emulators.
    pub fn with_endpoint(
        config: &IdentityProviderConfig,
        endpoint: Url,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    fn identity_from(response: LookupResponseDto) -> Result<VerifiedIdentity, TokenVerifierError> {
        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| TokenVerifierError::rejected("credential resolves to no account"))?;
        let email = user
            .email
            .ok_or_else(|| TokenVerifierError::malformed("account record carries no email"))?;
        Ok(VerifiedIdentity {
            uid: user.local_id,
            email,
            name: user.display_name,
            photo_url: user.photo_url,
        })
    }
}

#[async_trait]
impl TokenVerifier for HttpTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenVerifierError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequestDto { id_token: token })
            .send()
            .await
            .map_err(|err| TokenVerifierError::connection(err.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let payload: LookupResponseDto = response
                    .json()
                    .await
                    .map_err(|err| TokenVerifierError::malformed(err.to_string()))?;
                Self::identity_from(payload)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(TokenVerifierError::rejected(format!(
                    "provider rejected credential with status {}",
                    response.status()
                )))
            }
            status => Err(TokenVerifierError::connection(format!(
                "provider answered with status {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(json: &str) -> String {
        STANDARD.encode(json)
    }

    #[test]
    fn decodes_credential_blob() {
        let blob = encoded(r#"{"project_id":"shelfmark-dev","api_key":"AIzaTest"}"#);
        let config = IdentityProviderConfig::from_base64(&blob).expect("valid blob");
        assert_eq!(config.project_id, "shelfmark-dev");
        assert_eq!(config.api_key, "AIzaTest");
    }

    #[test]
    fn rejects_non_base64_blob() {
        let error = IdentityProviderConfig::from_base64("%%%").expect_err("invalid blob");
        assert!(matches!(error, IdentityConfigError::Decode { .. }));
    }

    #[test]
    fn rejects_non_json_blob() {
        let error =
            IdentityProviderConfig::from_base64(&encoded("not json")).expect_err("invalid blob");
        assert!(matches!(error, IdentityConfigError::Parse { .. }));
    }

    #[test]
    fn lookup_response_maps_to_identity() {
        let payload: LookupResponseDto = serde_json::from_str(
            r#"{"users":[{"localId":"uid-1","email":"ada@example.com","displayName":"Ada","photoUrl":null}]}"#,
        )
        .expect("valid payload");
        let identity = HttpTokenVerifier::identity_from(payload).expect("identity present");
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn empty_user_list_is_a_rejection() {
        let payload: LookupResponseDto =
            serde_json::from_str(r#"{"users":[]}"#).expect("valid payload");
        let error = HttpTokenVerifier::identity_from(payload).expect_err("no account");
        assert!(matches!(error, TokenVerifierError::Rejected { .. }));
    }
}
