use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Request body for POST /login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response from the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// Response from GET /balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

/// A single entry of the transaction history, in the order the API returns them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// Request body for POST /transfer
///
/// A NaN amount serializes as `null`, the same thing the browser sends for
/// `Number("abc")`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    #[serde(rename = "toEmail")]
    pub to_email: String,
    pub amount: f64,
}

/// Error body returned by the API on failure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorResponse {
    /// Parse an error body, keeping nothing when it isn't a JSON object
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .map(|value| ErrorResponse {
                error: value.get("error").and_then(|v| v.as_str()).map(str::to_string),
                message: value.get("message").and_then(|v| v.as_str()).map(str::to_string),
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.error, &self.message) {
            (Some(error), _) => write!(f, "{}", error),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "no error message"),
        }
    }
}

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(ErrorResponse),
    /// 401 Unauthorized
    #[error("Unauthorized: {0}")]
    Unauthorized(ErrorResponse),
    /// 403 Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(ErrorResponse),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(ErrorResponse),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, ErrorResponse),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, ErrorResponse),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Build the error for a non-success status from its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let response = ErrorResponse::from_body(body);
        match status {
            400 => ApiError::BadRequest(response),
            401 => ApiError::Unauthorized(response),
            403 => ApiError::Forbidden(response),
            404 => ApiError::NotFound(response),
            500..=599 => ApiError::ServerError(status, response),
            _ => ApiError::HttpError(status, response),
        }
    }

    /// The `error` field the server put in its response body, if any
    pub fn server_message(&self) -> Option<&str> {
        let response = match self {
            ApiError::BadRequest(r)
            | ApiError::Unauthorized(r)
            | ApiError::Forbidden(r)
            | ApiError::NotFound(r)
            | ApiError::ServerError(_, r)
            | ApiError::HttpError(_, r) => r,
            ApiError::RequestError(_) | ApiError::DeserializationError(_) => return None,
        };
        response.error.as_deref().filter(|msg| !msg.is_empty())
    }

    /// Message shown to the user: the server's message or the given fallback
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_accepts_numeric_user_id() {
        let parsed: LoginResponse =
            serde_json::from_str(r#"{"token":"abc","userId":42}"#).unwrap();
        assert_eq!(parsed.token, "abc");
        assert_eq!(parsed.user_id, "42");

        let parsed: LoginResponse =
            serde_json::from_str(r#"{"token":"abc","userId":"u-7"}"#).unwrap();
        assert_eq!(parsed.user_id, "u-7");
    }

    #[test]
    fn test_transfer_request_wire_format() {
        let body = serde_json::to_value(TransferRequest {
            to_email: "bob@example.com".to_string(),
            amount: 25.5,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"toEmail": "bob@example.com", "amount": 25.5}));
    }

    #[test]
    fn test_nan_amount_is_sent_as_null() {
        let body = serde_json::to_string(&TransferRequest {
            to_email: "bob@example.com".to_string(),
            amount: f64::NAN,
        })
        .unwrap();
        assert_eq!(body, r#"{"toEmail":"bob@example.com","amount":null}"#);
    }

    #[test]
    fn test_server_message_is_used_when_present() {
        let err = ApiError::from_status(400, r#"{"error":"Insufficient funds"}"#);
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.user_message("Transfer failed"), "Insufficient funds");
    }

    #[test]
    fn test_fallback_when_no_server_message() {
        let cases = [
            ApiError::from_status(500, "Internal Server Error"),
            ApiError::from_status(401, r#"{"error":""}"#),
            ApiError::from_status(418, r#"{"message":"teapot"}"#),
            ApiError::RequestError("connection refused".to_string()),
        ];
        for err in cases {
            assert_eq!(err.user_message("Login failed"), "Login failed");
        }
    }
}
