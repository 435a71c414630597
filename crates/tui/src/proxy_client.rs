use alert_control_streamlabs::api::check_response;
use alert_control_streamlabs::auth::Session;
use alert_control_streamlabs::types::{
    AlertState, CommandResponse, SetMuteRequest, SetSuppressRequest, StatusResponse,
    StreamlabsUser,
};
use alert_control_streamlabs::{ApiError, ApiResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the alert proxy.
#[derive(Clone)]
pub struct ProxyClient {
    http: Client,
    base_url: String,
}

fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Unexpected proxy response: {e}")))
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_command<B: Serialize>(
        &self,
        session: &Session,
        route: &str,
        body: &B,
    ) -> ApiResult<CommandResponse> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, route))
            .bearer_auth(session.bearer())
            .json(body)
            .send()
            .await?;
        let body = check_response(response).await?;
        debug!("{} response: {}", route, body);
        decode(body)
    }

    pub async fn set_mute(&self, session: &Session, mute: bool) -> ApiResult<CommandResponse> {
        self.post_command(session, "/api/alerts/set-mute", &SetMuteRequest { mute })
            .await
    }

    pub async fn set_suppress(
        &self,
        session: &Session,
        suppress: bool,
    ) -> ApiResult<CommandResponse> {
        self.post_command(
            session,
            "/api/alerts/set-suppress",
            &SetSuppressRequest { suppress },
        )
        .await
    }

    pub async fn status(&self) -> ApiResult<AlertState> {
        let response = self
            .http
            .get(format!("{}/api/alerts/status", self.base_url))
            .send()
            .await?;
        let body = check_response(response).await?;
        let status: StatusResponse = decode(body)?;
        Ok(status.status)
    }

    pub async fn user_info(&self, session: &Session) -> ApiResult<StreamlabsUser> {
        let response = self
            .http
            .get(format!("{}/api/userinfo", self.base_url))
            .bearer_auth(session.bearer())
            .send()
            .await?;
        let body = check_response(response).await?;
        decode(body)
    }
}
