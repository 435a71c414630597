use crate::api::{check_response, http_client, STREAMLABS_API_V2};
use crate::error::{ApiError, ApiResult};
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use url::Url;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5173/auth/callback";
pub const OAUTH_SCOPES: &str = "alerts.create alerts.write";

/// The operator's login. Passed by reference to every authenticated call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn bearer(&self) -> &str {
        &self.access_token
    }

    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}

/// Encrypted on-disk home of the [`Session`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn default_location() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "alert-control", "alert-control")
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;
        Ok(Self::in_dir(proj_dirs.data_dir()))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn session_path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    fn secret_key_path(&self) -> PathBuf {
        self.dir.join(".secret_key")
    }

    pub fn load(&self) -> ApiResult<Option<Session>> {
        self.read_session().map_err(storage_error)
    }

    pub fn save(&self, session: &Session) -> ApiResult<()> {
        self.write_session(session).map_err(storage_error)
    }

    /// Logout. Removing an absent session is not an error.
    pub fn clear(&self) -> ApiResult<()> {
        match fs::remove_file(self.session_path()) {
            Ok(()) => {
                info!("Session removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::Storage(e.to_string())),
        }
    }

    fn read_session(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let encrypted = fs::read(&path)?;
        let decrypted = self.decrypt(&encrypted)?;
        let session: Session = serde_json::from_slice(&decrypted)?;
        Ok(Some(session))
    }

    fn write_session(&self, session: &Session) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec(session)?;
        let encrypted = self.encrypt(&json)?;
        write_secure_file(&self.session_path(), &encrypted)?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        match self.load() {
            Ok(session) => session.is_some_and(|s| s.is_authenticated()),
            Err(e) => {
                error!("Failed to read session: {}", e);
                false
            }
        }
    }

    fn get_or_create_key(&self) -> Result<[u8; 32]> {
        let path = self.secret_key_path();

        if path.exists() {
            let key_bytes = fs::read(&path)?;
            if key_bytes.len() == 32 {
                let mut key = [0u8; 32];
                key.copy_from_slice(&key_bytes);
                return Ok(key);
            }
        }

        fs::create_dir_all(&self.dir)?;
        let mut key = [0u8; 32];
        rand::thread_rng().fill(&mut key);
        write_secure_file(&path, &key)?;
        Ok(key)
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        use aes_gcm::{
            aead::{Aead, KeyInit},
            Aes256Gcm, Nonce,
        };

        let key = self.get_or_create_key()?;
        let cipher = Aes256Gcm::new(aes_gcm::aead::Key::<Aes256Gcm>::from_slice(&key));

        let mut nonce_bytes = [0u8; 12];
        rand::thread_rng().fill(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| anyhow!("Encryption failed"))?;

        let mut result = nonce_bytes.to_vec();
        result.extend_from_slice(&ciphertext);
        Ok(result)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        use aes_gcm::{
            aead::{Aead, KeyInit},
            Aes256Gcm, Nonce,
        };

        if ciphertext.len() < 12 {
            return Err(anyhow!("Invalid ciphertext"));
        }

        let key = self.get_or_create_key()?;
        let cipher = Aes256Gcm::new(aes_gcm::aead::Key::<Aes256Gcm>::from_slice(&key));

        let nonce = Nonce::from_slice(&ciphertext[..12]);
        let plaintext = cipher
            .decrypt(nonce, &ciphertext[12..])
            .map_err(|_| anyhow!("Decryption failed"))?;

        Ok(plaintext)
    }
}

fn storage_error(e: anyhow::Error) -> ApiError {
    ApiError::Storage(format!("{e:#}"))
}

fn write_secure_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = file.metadata()?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base: String,
}

impl OAuthCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            api_base: STREAMLABS_API_V2.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.api_base.trim_end_matches('/'), name)
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    code: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

pub fn authorization_url(credentials: &OAuthCredentials) -> Result<String> {
    let url = Url::parse_with_params(
        &credentials.endpoint("authorize"),
        &[
            ("client_id", credentials.client_id.as_str()),
            ("redirect_uri", credentials.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", OAUTH_SCOPES),
        ],
    )?;
    Ok(url.to_string())
}

/// Trades a one-time authorization code for an access token. Single attempt.
pub async fn exchange_code(credentials: &OAuthCredentials, code: &str) -> ApiResult<String> {
    let request = TokenRequest {
        grant_type: "authorization_code",
        client_id: &credentials.client_id,
        client_secret: &credentials.client_secret,
        redirect_uri: &credentials.redirect_uri,
        code,
    };

    let response = http_client()
        .post(credentials.endpoint("token"))
        .json(&request)
        .send()
        .await?;

    let body = check_response(response).await?;
    let token: TokenResponse = serde_json::from_value(body)
        .map_err(|e| ApiError::Auth(format!("Malformed token response: {e}")))?;
    info!("Token exchange successful");
    Ok(token.access_token)
}

/// Accepts either the bare code or the whole callback URL.
pub fn extract_code(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let query = match Url::parse(input) {
        Ok(url) => url.query().map(str::to_string).unwrap_or_default(),
        Err(_) if input.contains("code=") => input
            .split_once('?')
            .map_or(input, |(_, q)| q)
            .to_string(),
        Err(_) => return Some(input.to_string()),
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .filter(|code| !code.is_empty())
}
