//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, Rating};

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid identifier")).with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_id",
        }))
    })
}

pub(crate) fn parse_rating(value: u8) -> Result<Rating, Error> {
    Rating::new(value).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "rating",
            "value": value,
            "code": "rating_out_of_range",
        }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        let id = Uuid::new_v4();
        assert_eq!(parse_uuid(&id.to_string(), "bookId").expect("valid"), id);
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    fn parse_uuid_rejects_malformed_input(#[case] raw: &str) {
        let error = parse_uuid(raw, "bookId").expect_err("malformed id rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "bookId");
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn parse_rating_rejects_out_of_range(#[case] value: u8) {
        let error = parse_rating(value).expect_err("out of range rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
