/*
[INPUT]:  HTTP status + raw response body + endpoint failure policy
[OUTPUT]: Outcome<T> (Success / Rejected) or a typed error
[POS]:    HTTP layer - response normalization
[UPDATE]: When changing how `ok: false` and error statuses are classified
*/

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::endpoint::FailurePolicy;
use crate::http::{Result, StockfighterError};
use crate::types::{ApiError, Outcome};

/// Classify one response.
///
/// An `ok: false` body is a rejection. A success status whose body lacks an
/// `ok` field is still decoded as a payload; only the payload's own shape is
/// checked then.
pub fn normalize<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
    policy: FailurePolicy,
) -> Result<Outcome<T>> {
    let value: Value =
        serde_json::from_str(body).map_err(|_| StockfighterError::MalformedResponse {
            status,
            body: body.to_string(),
        })?;

    let ok = value.get("ok").and_then(Value::as_bool);
    let error_status = status.is_client_error() || status.is_server_error();

    if error_status {
        let structured_rejection = policy == FailurePolicy::Body && ok == Some(false);
        if !structured_rejection {
            return Err(StockfighterError::Http {
                status,
                body: body.to_string(),
            });
        }
    }

    if ok == Some(false) {
        let rejection: ApiError = serde_json::from_value(value)?;
        return Ok(Outcome::Rejected(rejection));
    }

    Ok(Outcome::Success(serde_json::from_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VenueHeartbeat;

    #[test]
    fn ok_true_body_is_success() {
        let outcome: Outcome<VenueHeartbeat> = normalize(
            StatusCode::OK,
            r#"{"ok":true,"venue":"TESTEX"}"#,
            FailurePolicy::Body,
        )
        .expect("normalize");
        assert_eq!(
            outcome,
            Outcome::Success(VenueHeartbeat {
                venue: "TESTEX".to_string()
            })
        );
    }

    #[test]
    fn success_status_without_ok_field_decodes_payload() {
        let outcome: Outcome<VenueHeartbeat> =
            normalize(StatusCode::OK, r#"{"venue":"TESTEX"}"#, FailurePolicy::Body)
                .expect("normalize");
        assert!(outcome.is_ok());
    }

    #[test]
    fn ok_false_with_200_is_rejection() {
        let outcome: Outcome<VenueHeartbeat> = normalize(
            StatusCode::OK,
            r#"{"ok":false,"error":"unknown venue"}"#,
            FailurePolicy::Body,
        )
        .expect("normalize");
        assert_eq!(outcome.rejection().map(|err| err.error.as_str()), Some("unknown venue"));
    }

    #[test]
    fn ok_false_with_error_status_is_still_rejection_under_body_policy() {
        let outcome: Outcome<VenueHeartbeat> = normalize(
            StatusCode::NOT_FOUND,
            r#"{"ok":false,"error":"No venue exists with the symbol NOPE"}"#,
            FailurePolicy::Body,
        )
        .expect("normalize");
        assert!(!outcome.is_ok());
    }

    #[test]
    fn ok_false_with_error_status_fails_under_status_policy() {
        let result: Result<Outcome<VenueHeartbeat>> = normalize(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"ok":false,"error":"down"}"#,
            FailurePolicy::Status,
        );
        match result {
            Err(StockfighterError::Http { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(body.contains("down"));
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[test]
    fn error_status_without_ok_field_is_http_error() {
        let result: Result<Outcome<VenueHeartbeat>> =
            normalize(StatusCode::BAD_GATEWAY, r#"{"message":"gateway"}"#, FailurePolicy::Body);
        assert!(matches!(result, Err(StockfighterError::Http { .. })));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let result: Result<Outcome<VenueHeartbeat>> =
            normalize(StatusCode::OK, "<html>oops</html>", FailurePolicy::Body);
        match result {
            Err(StockfighterError::MalformedResponse { body, .. }) => {
                assert_eq!(body, "<html>oops</html>");
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_is_malformed_not_empty_success() {
        let result: Result<Outcome<VenueHeartbeat>> =
            normalize(StatusCode::OK, "", FailurePolicy::Body);
        assert!(matches!(result, Err(StockfighterError::MalformedResponse { .. })));
    }

    #[test]
    fn shape_mismatch_is_serialization_error() {
        let result: Result<Outcome<VenueHeartbeat>> =
            normalize(StatusCode::OK, r#"{"ok":true}"#, FailurePolicy::Body);
        assert!(matches!(result, Err(StockfighterError::Serialization(_))));
    }
}
