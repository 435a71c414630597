use alert_control_streamlabs::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("No authorization token provided")]
    MissingToken,

    #[error("Invalid request body, expected {{ \"{field}\": boolean }}")]
    InvalidBody { field: &'static str },

    #[error("{context}")]
    Upstream {
        context: &'static str,
        source: ApiError,
    },

    #[error("The route {method} {uri} does not exist")]
    NotFound { method: String, uri: String },
}

pub fn available_routes() -> Value {
    json!({
        "root": "GET /",
        "setMute": "POST /api/alerts/set-mute",
        "setSuppress": "POST /api/alerts/set-suppress",
        "status": "GET /api/alerts/status",
        "userInfo": "GET /api/userinfo",
    })
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingToken => StatusCode::UNAUTHORIZED,
            ProxyError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { source, .. } => StatusCode::from_u16(source.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ProxyError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ProxyError::MissingToken | ProxyError::InvalidBody { .. } => {
                json!({ "error": self.to_string() })
            }
            ProxyError::Upstream { context, source } => json!({
                "error": context,
                "details": source.details(),
            }),
            ProxyError::NotFound { .. } => json!({
                "error": "Not Found",
                "message": self.to_string(),
                "availableRoutes": available_routes(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_body_names_the_field() {
        let err = ProxyError::InvalidBody { field: "suppress" };
        assert_eq!(
            err.to_string(),
            r#"Invalid request body, expected { "suppress": boolean }"#
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_status_is_propagated() {
        let err = ProxyError::Upstream {
            context: "Failed to set mute state",
            source: ApiError::Upstream {
                status: 429,
                body: json!({"error": "slow down"}),
            },
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn out_of_range_upstream_status_becomes_500() {
        let err = ProxyError::Upstream {
            context: "Failed to fetch user info",
            source: ApiError::Upstream {
                status: 1000,
                body: Value::Null,
            },
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
