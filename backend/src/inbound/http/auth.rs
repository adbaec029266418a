//! Bearer-token authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by
//! concentrating credential extraction and identity verification here. A
//! missing or malformed `Authorization` header is reported distinctly from a
//! credential the provider rejects; both map to 401.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::{TokenVerifierError, VerifiedIdentity};
use crate::domain::{Error, UserId};
use crate::inbound::http::state::HttpState;

/// Caller identity resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub identity: VerifiedIdentity,
}

fn bearer_token(header: Option<&str>) -> Result<String, Error> {
    let raw = header.ok_or_else(|| Error::unauthorized("missing Authorization header"))?;
    let token = raw
        .strip_prefix("Bearer ")
        .ok_or_else(|| Error::unauthorized("Authorization header must use the Bearer scheme"))?
        .trim();
    if token.is_empty() {
        return Err(Error::unauthorized("empty bearer credential"));
    }
    Ok(token.to_owned())
}

fn map_verifier_error(error: TokenVerifierError) -> Error {
    match error {
        TokenVerifierError::Connection { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        TokenVerifierError::Rejected { .. } => Error::unauthorized("invalid credential"),
        TokenVerifierError::Malformed { message } => {
            Error::internal(format!("identity provider response malformed: {message}"))
        }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let state =
                state.ok_or_else(|| Error::internal("authentication state not configured"))?;
            let token = bearer_token(header.as_deref())?;
            let identity = state
                .token_verifier
                .verify(&token)
                .await
                .map_err(map_verifier_error)?;
            let user_id = UserId::new(&identity.uid)
                .map_err(|err| Error::unauthorized(format!("identity rejected: {err}")))?;
            Ok(Self { user_id, identity })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[test]
    fn extracts_token_from_bearer_header() {
        let token = bearer_token(Some("Bearer abc.def.ghi")).expect("valid header");
        assert_eq!(token, "abc.def.ghi");
    }

    #[rstest]
    #[case(None, "missing Authorization header")]
    #[case(Some("Basic abc"), "Authorization header must use the Bearer scheme")]
    #[case(Some("Bearer "), "empty bearer credential")]
    fn rejects_absent_or_malformed_headers(
        #[case] header: Option<&str>,
        #[case] expected: &str,
    ) {
        let error = bearer_token(header).expect_err("header rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), expected);
    }

    #[test]
    fn rejected_credential_maps_to_unauthorized() {
        let error = map_verifier_error(TokenVerifierError::rejected("expired"));
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), "invalid credential");
    }

    #[test]
    fn provider_outage_maps_to_service_unavailable() {
        let error = map_verifier_error(TokenVerifierError::connection("timeout"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
