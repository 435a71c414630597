use crate::error::ProxyError;
use crate::state::AppState;
use alert_control_streamlabs::types::{AlertCommand, StatusResponse};
use axum::body::Bytes;
use axum::extract::{OriginalUri, Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/alerts/set-mute", post(set_mute).fallback(not_found))
        .route(
            "/alerts/set-suppress",
            post(set_suppress).fallback(not_found),
        )
        .route("/alerts/status", get(alert_status).fallback(not_found))
        .route("/userinfo", get(user_info).fallback(not_found));

    Router::new()
        .route("/", get(root).fallback(not_found))
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn(log_request))
        .layer(cors())
        .with_state(state)
}

/// `Authorization` must be listed by name; a `*` allow-headers does not cover it.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let response = next.run(request).await;
    info!("{} {} -> {}", method, uri, response.status());
    response
}

/// Second space-separated part of the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ProxyError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(' ').nth(1))
        .filter(|token| !token.is_empty())
        .ok_or(ProxyError::MissingToken)
}

fn bool_field(body: &[u8], field: &'static str) -> Result<bool, ProxyError> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get(field).and_then(Value::as_bool))
        .ok_or(ProxyError::InvalidBody { field })
}

async fn root() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Streamlabs Alert Control API is running",
        "endpoints": {
            "setMute": "POST /api/alerts/set-mute",
            "setSuppress": "POST /api/alerts/set-suppress",
            "status": "GET /api/alerts/status",
            "userInfo": "GET /api/userinfo",
        }
    }))
}

async fn set_mute(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    let token = bearer_token(&headers)?;
    let mute = bool_field(&body, "mute")?;
    run_command(&state, token, AlertCommand::for_mute(mute), "Failed to set mute state").await
}

async fn set_suppress(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    let token = bearer_token(&headers)?;
    let suppress = bool_field(&body, "suppress")?;
    run_command(
        &state,
        token,
        AlertCommand::for_suppress(suppress),
        "Failed to set suppress state",
    )
    .await
}

async fn run_command(
    state: &AppState,
    token: &str,
    command: AlertCommand,
    context: &'static str,
) -> Result<Json<Value>, ProxyError> {
    match state.api.send_command(token, command).await {
        Ok(details) => {
            let status = state.alerts.apply(command);
            info!(?command, %status, "Alert command applied");
            Ok(Json(json!({ "success": true, "details": details })))
        }
        Err(source) => {
            error!("{}: {}", context, source);
            Err(ProxyError::Upstream { context, source })
        }
    }
}

async fn alert_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: state.alerts.current(),
    })
}

async fn user_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ProxyError> {
    let token = bearer_token(&headers)?;
    match state.api.get_user(token).await {
        Ok(mut body) => Ok(Json(
            body.get_mut("streamlabs")
                .map(Value::take)
                .filter(|user| !user.is_null())
                .unwrap_or_else(|| json!({})),
        )),
        Err(source) => {
            error!("Error fetching user info: {}", source);
            Err(ProxyError::Upstream {
                context: "Failed to fetch user info",
                source,
            })
        }
    }
}

async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> ProxyError {
    ProxyError::NotFound {
        method: method.to_string(),
        uri: uri.to_string(),
    }
}
