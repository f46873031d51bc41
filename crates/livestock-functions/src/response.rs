//! HTTP-shaped handler responses.

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::FunctionError;

/// Status code plus JSON body, as returned by a hosted function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: u16,
    pub body: Value,
}

impl FunctionResponse {
    /// 200 with `body` serialized as JSON.
    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(&FunctionError::Json(e)),
        }
    }

    /// 400 with `{"error": <message>}`.
    pub fn error(error: &FunctionError) -> Self {
        Self {
            status: 400,
            body: json!({ "error": error.to_string() }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<FunctionError> for FunctionResponse {
    fn from(error: FunctionError) -> Self {
        Self::error(&error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body() {
        let response = FunctionResponse::from(FunctionError::Forbidden);
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({"error": "Admin access required"}));
        assert!(!response.is_success());
    }

    #[test]
    fn test_ok_body() {
        let response = FunctionResponse::ok(&json!({"success": true}));
        assert!(response.is_success());
        assert_eq!(response.body["success"], true);
    }
}
