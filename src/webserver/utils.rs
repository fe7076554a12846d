/// Response helpers shared by all route handlers
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::errors::ArmadaError;
use crate::logger::{self, LogTag};
use crate::types::Environment;

/// 400 with the list of missing request fields
pub fn missing_fields_response(missing_fields: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "All fields are required",
            "missingFields": missing_fields,
        })),
    )
        .into_response()
}

pub fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// Map a crate error onto the HTTP contract: validation failures become 400
/// with details, everything else is logged and answered with a generic 500
/// so upstream failure details never leak to the caller.
pub fn error_response(err: ArmadaError, generic_message: &str) -> Response {
    match err {
        ArmadaError::Validation { missing_fields } => missing_fields_response(missing_fields),
        err if err.is_validation() => bad_request(&err.to_string()),
        err => {
            logger::error(LogTag::Webserver, &format!("{}: {}", generic_message, err));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": generic_message })),
            )
                .into_response()
        }
    }
}

/// Record a field as missing when absent. Handlers collect all names first
/// so the 400 lists every missing field, not just the first.
pub fn require<T>(missing: &mut Vec<String>, name: &str, value: Option<T>) -> Result<T, ()> {
    value.ok_or_else(|| missing.push(name.to_string()))
}

/// Optional environment field; absent means prod, unknown values are a 400
pub fn parse_environment(value: Option<&str>) -> Result<Environment, Response> {
    match value {
        None => Ok(Environment::Prod),
        Some(raw) => raw.parse().map_err(|e: String| bad_request(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_collects_every_missing_name() {
        let mut missing = Vec::new();
        let a = require(&mut missing, "chainId", Some(1u64));
        let b = require::<String>(&mut missing, "senderAddress", None);
        let c = require::<String>(&mut missing, "fleetAddress", None);

        assert_eq!(a, Ok(1));
        assert!(b.is_err());
        assert!(c.is_err());
        assert_eq!(missing, vec!["senderAddress", "fleetAddress"]);
    }

    #[test]
    fn environment_defaults_to_prod() {
        assert_eq!(parse_environment(None).unwrap(), Environment::Prod);
        assert_eq!(
            parse_environment(Some("staging")).unwrap(),
            Environment::Staging
        );
        assert!(parse_environment(Some("mainnet")).is_err());
    }
}
