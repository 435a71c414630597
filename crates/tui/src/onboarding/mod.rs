use crate::input::InputState;
use alert_control_streamlabs::auth::{self, OAuthCredentials};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginStatus {
    WaitingForCode,
    ExchangingToken,
}

/// The login screen: authorization URL plus code entry.
pub struct LoginState {
    pub status: LoginStatus,
    pub auth_url: Option<String>,
    pub code: InputState,
    pub error_message: Option<String>,
}

impl LoginState {
    pub fn new(credentials: &OAuthCredentials) -> Self {
        let (auth_url, error_message) = if !credentials.is_configured() {
            (
                None,
                Some(
                    "Set STREAMLABS_CLIENT_ID and STREAMLABS_CLIENT_SECRET to log in".to_string(),
                ),
            )
        } else {
            match auth::authorization_url(credentials) {
                Ok(url) => (Some(url), None),
                Err(e) => (None, Some(format!("Invalid authorization URL: {e}"))),
            }
        };

        Self {
            status: LoginStatus::WaitingForCode,
            auth_url,
            code: InputState::masked(),
            error_message,
        }
    }

    /// The code to exchange, if the operator entered something usable.
    pub fn take_code(&mut self) -> Result<String, String> {
        if self.status == LoginStatus::ExchangingToken {
            return Err("Already exchanging a code".to_string());
        }
        if self.auth_url.is_none() {
            return Err(self
                .error_message
                .clone()
                .unwrap_or_else(|| "Login is not configured".to_string()));
        }
        if self.code.is_empty() {
            return Err("Paste the code or the callback URL first".to_string());
        }
        match auth::extract_code(&self.code.buffer) {
            Some(code) => {
                self.status = LoginStatus::ExchangingToken;
                self.error_message = None;
                Ok(code)
            }
            None => Err("No code found in the callback URL".to_string()),
        }
    }

    pub fn exchange_failed(&mut self, error: String) {
        self.status = LoginStatus::WaitingForCode;
        self.code.clear();
        self.error_message = Some(error);
    }
}
