//! Port for the external token-issuing identity provider.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by token verification adapters.
    pub enum TokenVerifierError {
        /// The identity provider could not be reached.
        Connection { message: String } =>
            "identity provider unreachable: {message}",
        /// The provider rejected the credential.
        Rejected { message: String } =>
            "credential rejected: {message}",
        /// The provider answered with something unparseable.
        Malformed { message: String } =>
            "identity provider response malformed: {message}",
    }
}

/// Identity attested by the provider for a bearer credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub photo_url: Option<String>,
}

/// Port verifying bearer credentials against the identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Exchange a raw bearer token for the identity it attests.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, TokenVerifierError>;
}
