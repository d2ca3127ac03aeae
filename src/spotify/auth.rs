use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::{
    config,
    error::HarvestError,
    server::start_api_server,
    types::{LoginSession, SharedLoginSession, Token},
    utils, warning,
};

use super::ensure_success;

/// How long the flow waits for the browser to come back to the callback.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self.refresh_token.unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth 2.0 PKCE login flow and returns the user token.
///
/// 1. Generates the code verifier and its SHA256 challenge
/// 2. Stores the verifier in the login session shared with the callback server
/// 3. Starts the local callback server
/// 4. Opens the authorization URL in the browser (or prints it)
/// 5. Waits up to 60 seconds for the callback to put a token in the session
///
/// The session is passed explicitly to the server; nothing is kept in
/// process-wide state.
///
/// # Errors
///
/// `MissingConfig` when client id or redirect URI are unset, `Auth` when the
/// URL cannot be built or the login times out.
pub async fn auth(session: SharedLoginSession) -> Result<Token, HarvestError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = authorize_url(&code_challenge)?;

    {
        let mut lock = session.lock().await;
        *lock = Some(LoginSession {
            code_verifier,
            token: None,
        });
    }

    let server_session = Arc::clone(&session);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_session).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(session)
        .await
        .ok_or_else(|| HarvestError::Auth("login failed or timed out".to_string()))
}

fn authorize_url(code_challenge: &str) -> Result<Url, HarvestError> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;
    let scope = config::spotify_scope();

    Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| HarvestError::Auth(format!("invalid authorization URL: {}", e)))
}

/// Polls the login session once per second until the callback stored a token.
async fn wait_for_token(session: SharedLoginSession) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        let lock = session.lock().await;
        if let Some(token) = lock.as_ref().and_then(|s| s.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new user token.
///
/// The returned token may carry an empty refresh token when Spotify does not
/// rotate it; callers keep the previous one in that case.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, HarvestError> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await?;

    let res = ensure_success(res)
        .await
        .map_err(|e| HarvestError::Auth(e.to_string()))?;
    let json: TokenResponse = res.json().await?;

    Ok(json.into_token())
}

/// Exchanges the authorization code from the callback for a user token,
/// proving possession of the PKCE verifier.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, HarvestError> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let res = ensure_success(res)
        .await
        .map_err(|e| HarvestError::Auth(e.to_string()))?;
    let json: TokenResponse = res.json().await?;

    Ok(json.into_token())
}
