use crate::error::{ApiError, ApiResult};
use crate::types::AlertCommand;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

pub const STREAMLABS_API_V1: &str = "https://streamlabs.com/api/v1.0";
pub const STREAMLABS_API_V2: &str = "https://streamlabs.com/api/v2.0";

pub(crate) fn http_client() -> Client {
    Client::builder()
        .user_agent("alert-control/0.1")
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Reads a response body as JSON. Empty bodies become `null` and non-JSON
/// bodies are kept as a string.
pub async fn read_body(response: Response) -> ApiResult<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Turns a non-2xx response into [`ApiError::Upstream`], passing 2xx bodies
/// through.
pub async fn check_response(response: Response) -> ApiResult<Value> {
    let status = response.status();
    let body = read_body(response).await?;
    if !status.is_success() {
        return Err(ApiError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Single-attempt client for the Streamlabs REST API.
#[derive(Clone)]
pub struct StreamlabsApi {
    client: Client,
    v1_base: String,
    v2_base: String,
}

impl Default for StreamlabsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamlabsApi {
    pub fn new() -> Self {
        Self::with_bases(STREAMLABS_API_V1, STREAMLABS_API_V2)
    }

    pub fn with_bases(v1_base: impl Into<String>, v2_base: impl Into<String>) -> Self {
        Self {
            client: http_client(),
            v1_base: v1_base.into().trim_end_matches('/').to_string(),
            v2_base: v2_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn command_url(&self, command: AlertCommand) -> String {
        format!("{}{}", self.v2_base, command.path())
    }

    pub async fn get_user(&self, token: &str) -> ApiResult<Value> {
        let url = format!("{}/user", self.v1_base);
        debug!("Fetching user info from {}", url);
        let response = self.client.get(&url).bearer_auth(token).send().await?;
        check_response(response).await
    }

    pub async fn send_command(&self, token: &str, command: AlertCommand) -> ApiResult<Value> {
        let url = self.command_url(command);
        info!("Calling Streamlabs endpoint: {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        check_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> StreamlabsApi {
        StreamlabsApi::with_bases(
            format!("{}/api/v1.0", server.uri()),
            format!("{}/api/v2.0/", server.uri()),
        )
    }

    #[tokio::test]
    async fn send_command_posts_empty_object_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2.0/alerts/pause_queue"))
            .and(header("authorization", "Bearer tok"))
            .and(body_json(json!({})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let body = api_for(&server)
            .send_command("tok", AlertCommand::PauseQueue)
            .await
            .unwrap();
        assert_eq!(body, json!({"success": true}));
    }

    #[tokio::test]
    async fn non_success_status_becomes_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1.0/user"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_token"})),
            )
            .mount(&server)
            .await;

        match api_for(&server).get_user("expired").await {
            Err(ApiError::Upstream { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, json!({"error": "invalid_token"}));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_success_body_reads_as_null() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v2.0/alerts/mute_volume"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let body = api_for(&server)
            .send_command("tok", AlertCommand::MuteVolume)
            .await
            .unwrap();
        assert_eq!(body, Value::Null);
    }

    #[test]
    fn command_url_joins_without_double_slash() {
        let api = StreamlabsApi::with_bases("http://x/v1/", "http://x/v2/");
        assert_eq!(
            api.command_url(AlertCommand::UnmuteVolume),
            "http://x/v2/alerts/unmute_volume"
        );
    }
}
