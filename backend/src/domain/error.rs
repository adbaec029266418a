//! Domain-level error type.
//!
//! Transport agnostic: the HTTP inbound adapter maps [`ErrorCode`] values to
//! status codes and serialises the payload as the error body. Keeping the
//! type here lets services and ports fail without knowing about actix.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "X-Trace-Id";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with existing state (duplicate review,
    /// self-upvote).
    Conflict,
    /// A required collaborator (document store, identity provider) is
    /// unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Error payload returned to clients.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip)]
    trace_id: Option<String>,
}

impl Error {
    /// Create a new error, panicking if the message is empty.
    ///
    /// All call sites pass literal or formatted non-empty messages; an empty
    /// message is a programming error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        assert!(
            !message.trim().is_empty(),
            "error messages must not be empty"
        );
        Self {
            code,
            message,
            details: None,
            trace_id: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to clients.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Trace identifier propagated to the response headers.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the request trace identifier.
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_code_and_message() {
        let error = Error::not_found("book missing");
        let value = serde_json::to_value(&error).expect("serialise error");
        assert_eq!(value["code"], "not_found");
        assert_eq!(value["message"], "book missing");
        assert!(value.get("details").is_none());
    }

    #[test]
    fn details_round_trip() {
        let error = Error::invalid_request("bad field").with_details(json!({ "field": "title" }));
        let value = serde_json::to_value(&error).expect("serialise error");
        assert_eq!(value["details"]["field"], "title");
    }

    #[test]
    fn trace_id_is_not_serialised() {
        let error = Error::internal("boom").with_trace_id("abc");
        assert_eq!(error.trace_id(), Some("abc"));
        let value = serde_json::to_value(&error).expect("serialise error");
        assert!(value.get("traceId").is_none());
    }

    #[test]
    #[should_panic(expected = "error messages must not be empty")]
    fn empty_message_panics() {
        let _ = Error::internal("   ");
    }
}
