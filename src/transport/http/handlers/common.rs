use crate::domain::error::{InventoryError, InventoryResult};
use crate::transport::http::types::ApiResponse;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, error};

/// Wraps `data` in a successful envelope.
pub fn respond<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (status, Json(ApiResponse::success(value))).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            InventoryError::Internal(e.to_string()).into_response()
        }
    }
}

/// Unwraps a JSON body, turning a rejection into a 400 envelope.
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>, expected: &str) -> Result<T, Response> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(e) => Err(InventoryError::validation(format!(
            "Invalid JSON body: {} (expected: {})",
            e.body_text(),
            expected
        ))
        .into_response()),
    }
}

/// Unwraps a path segment. A segment that cannot be decoded names nothing, so the
/// rejection becomes `not_found`.
pub fn path_param(
    param: Result<Path<String>, PathRejection>,
    not_found: fn() -> InventoryError,
) -> Result<String, Response> {
    match param {
        Ok(Path(v)) => Ok(v),
        Err(e) => {
            debug!(error = %e.body_text(), "Undecodable path parameter");
            Err(not_found().into_response())
        }
    }
}

/// Unwraps a query string, turning a rejection into a 400 envelope.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Response> {
    match query {
        Ok(Query(v)) => Ok(v),
        Err(e) => Err(
            InventoryError::validation(format!("Invalid query string: {}", e.body_text()))
                .into_response(),
        ),
    }
}

/// Coerces a JSON value into a text field. Numbers are stringified; anything else is
/// treated as absent.
pub fn coerce_text(v: &JsonValue) -> Option<String> {
    if let Some(s) = v.as_str() {
        return Some(s.to_string());
    }
    if v.is_number() {
        return Some(v.to_string());
    }
    None
}

/// Coerces a JSON value into the integer material code (e.g. `"1440"` -> 1440).
pub fn coerce_material(v: Option<&JsonValue>) -> InventoryResult<Option<i64>> {
    let invalid = || InventoryError::validation("Material must be a number");
    let v = match v {
        None | Some(JsonValue::Null) => return Ok(None),
        Some(v) => v,
    };
    if let Some(n) = v.as_i64() {
        return Ok(Some(n));
    }
    if let Some(f) = v.as_f64() {
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            return Ok(Some(f as i64));
        }
        return Err(invalid());
    }
    if let Some(s) = v.as_str() {
        return s.trim().parse::<i64>().map(Some).map_err(|_| invalid());
    }
    Err(invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn material_accepts_numbers_and_numeric_strings() {
        assert_eq!(coerce_material(Some(&json!(1440))).unwrap(), Some(1440));
        assert_eq!(coerce_material(Some(&json!("1440"))).unwrap(), Some(1440));
        assert_eq!(coerce_material(Some(&json!(" 7 "))).unwrap(), Some(7));
        assert_eq!(coerce_material(Some(&json!(12.0))).unwrap(), Some(12));
        assert_eq!(coerce_material(None).unwrap(), None);
        assert_eq!(coerce_material(Some(&JsonValue::Null)).unwrap(), None);
    }

    #[test]
    fn material_rejects_everything_else() {
        for v in [json!("steel"), json!(1.5), json!(true), json!([1]), json!({"n": 1})] {
            let err = coerce_material(Some(&v)).unwrap_err();
            assert_eq!(err.to_string(), "Material must be a number", "{}", v);
        }
    }

    #[test]
    fn material_rejects_floats_outside_i64() {
        // 2^63 is the first float above i64::MAX.
        for v in [json!(9.223372036854776e18), json!(1e19), json!(-1e19)] {
            let err = coerce_material(Some(&v)).unwrap_err();
            assert_eq!(err.to_string(), "Material must be a number", "{}", v);
        }
    }

    #[test]
    fn text_accepts_strings_and_numbers() {
        assert_eq!(coerce_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(coerce_text(&json!(5449000000996u64)).as_deref(), Some("5449000000996"));
        assert_eq!(coerce_text(&json!(null)), None);
        assert_eq!(coerce_text(&json!({"a": 1})), None);
    }
}
