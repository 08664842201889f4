//! # Request Validation
//!
//! The [`Validate`] trait and [`extract_validated_json`] helper. Handlers
//! take `Result<Json<T>, JsonRejection>` so a malformed body becomes a
//! structured 400 with the deserializer's detail instead of axum's
//! default rejection, then run the request type's own field validation.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Field-level validation for request bodies, run after deserialization.
pub trait Validate {
    /// Check field constraints; the message becomes the 400 detail.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON extraction result and validate the payload.
///
/// A body that fails to parse (missing required field, wrong type,
/// malformed JSON) yields a 400 whose `details` carries the
/// deserializer's message — the schema-validation detail the client
/// needs to fix the payload.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|rejection| {
        AppError::validation_with_details(
            "invalid request body",
            serde_json::json!({ "reason": rejection.body_text() }),
        )
    })?;
    value
        .validate()
        .map_err(|msg| AppError::validation_with_details(
            "invalid request body",
            serde_json::json!({ "reason": msg }),
        ))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: i32,
    }

    impl Validate for Probe {
        fn validate(&self) -> Result<(), String> {
            if self.value < 0 {
                return Err("value must not be negative".to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn valid_payload_passes() {
        let probe = extract_validated_json(Ok(Json(Probe { value: 3 }))).unwrap();
        assert_eq!(probe.value, 3);
    }

    #[test]
    fn failing_validation_becomes_400_with_detail() {
        let err = extract_validated_json(Ok(Json(Probe { value: -1 }))).unwrap_err();
        match err {
            AppError::Validation(_, Some(details)) => {
                assert!(details["reason"]
                    .as_str()
                    .unwrap()
                    .contains("negative"));
            }
            other => panic!("expected Validation with details, got: {other:?}"),
        }
    }
}
