use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_api_client::{Error as ApiError, StatusCode};

/// Substring the server puts in `detail` when the token lacks a required scope.
pub const INSUFFICIENT_SCOPE_MARKER: &str = "insufficient authentication scopes";

#[derive(Debug)]
pub enum TubesumApiError {
    Api(StatusCode, ErrorDetail),
    Internal(ApiError),
}

impl TubesumApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(status, _) => Some(*status),
            Self::Internal(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// True when the server reports that the granted OAuth scopes are not enough.
    pub fn is_insufficient_scope(&self) -> bool {
        match self {
            Self::Api(_, detail) => detail
                .detail
                .to_lowercase()
                .contains(INSUFFICIENT_SCOPE_MARKER),
            Self::Internal(_) => false,
        }
    }
}

impl From<ApiError> for TubesumApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, body) | ApiError::ServerError(status, body) => {
                TubesumApiError::Api(status, ErrorDetail::from_body(&body))
            }
            e => TubesumApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for TubesumApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TubesumApiError::Internal(e) => write!(f, "Internal error: {}", e),
            TubesumApiError::Api(status, detail) => write!(f, "({}) {}", status, detail.detail),
        }
    }
}

impl std::error::Error for TubesumApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    detail: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    /// Parse a `{"detail": ...}` body, keeping the raw text for anything else.
    pub fn from_body(body: &str) -> Self {
        let detail = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                detail: Value::String(message),
            }) => message,
            Ok(ErrorResponse { detail }) => detail.to_string(),
            Err(_) => body.trim().to_string(),
        };
        Self { detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_body() {
        let detail = ErrorDetail::from_body(r#"{"detail": "Invalid token"}"#);
        assert_eq!(detail.detail, "Invalid token");
    }

    #[test]
    fn test_detail_structured_body() {
        let detail = ErrorDetail::from_body(r#"{"detail": [{"loc": ["body"], "msg": "missing"}]}"#);
        assert!(detail.detail.contains("missing"));
    }

    #[test]
    fn test_detail_plain_text_body() {
        let detail = ErrorDetail::from_body("Internal Server Error\n");
        assert_eq!(detail.detail, "Internal Server Error");
    }

    #[test]
    fn test_insufficient_scope_is_case_insensitive() {
        let err = TubesumApiError::Api(
            StatusCode::FORBIDDEN,
            ErrorDetail {
                detail: "Insufficient authentication scopes. Please log in again.".to_string(),
            },
        );
        assert!(err.is_insufficient_scope());
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized_status() {
        let err = TubesumApiError::Api(
            StatusCode::UNAUTHORIZED,
            ErrorDetail {
                detail: "Token may have expired".to_string(),
            },
        );
        assert!(err.is_unauthorized());
        assert!(!err.is_insufficient_scope());
        assert_eq!(err.to_string(), "(401 Unauthorized) Token may have expired");
    }
}
