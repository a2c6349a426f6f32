use std::{
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Error, Res, config, info,
    management::TokenManager,
    server::start_api_server,
    spotify::session::Session,
    success,
    types::{Credentials, PendingAuth, Token, TokenResponse},
    utils, warning,
};

/// How long the interactive flow waits for the browser callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(120);

/// Transport timeout applied to every API request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds and owns the authenticated [`Session`].
///
/// A session is constructed at most once per authenticator: later calls to
/// [`Authenticator::authenticate`] hand out the same session. When
/// construction fails nothing is kept, so the next call starts over from the
/// authorization cache.
///
/// # Example
///
/// ```
/// let credentials = config::load_credentials(config::config_path(None))?;
/// let mut authenticator = Authenticator::new(credentials);
/// let session = authenticator.authenticate().await?;
/// ```
pub struct Authenticator {
    credentials: Credentials,
    cache_path: PathBuf,
    session: Option<Session>,
}

impl Authenticator {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            cache_path: config::token_cache_path(),
            session: None,
        }
    }

    /// Uses `path` as the authorization cache instead of the configured one.
    pub fn with_cache_path(mut self, path: PathBuf) -> Self {
        self.cache_path = path;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drops the current session; the next `authenticate` call rebuilds it.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Returns the session, building it on first use.
    ///
    /// A still valid token from the authorization cache is used as is, an
    /// expired one is refreshed. Without a usable cached token the
    /// authorization-code flow runs in the browser and its token is written
    /// to the cache.
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] when no token could be obtained. The
    /// authenticator is left unauthenticated.
    pub async fn authenticate(&mut self) -> Res<&Session> {
        if self.session.is_none() {
            match self.build_session().await {
                Ok(session) => {
                    self.session = Some(session);
                }
                Err(e) => {
                    self.reset();
                    warning!("Spotify authentication failed: {}", e);
                    return Err(e);
                }
            }
        }

        self.session
            .as_ref()
            .ok_or_else(|| Error::Authentication("session was not initialized".to_string()))
    }

    async fn build_session(&self) -> Res<Session> {
        let client = http_client()?;
        let token_url = config::spotify_apitoken_url();

        let tokens = match self.cached_tokens(&client, &token_url).await {
            Some(tokens) => tokens,
            None => {
                let token = authorize(&client, &self.credentials, &token_url).await?;
                let tokens = TokenManager::new(token, self.cache_path.clone());
                if let Err(e) = tokens.persist().await {
                    warning!("Failed to save token to cache: {}", e);
                }
                success!("Authentication successful!");
                tokens
            }
        };

        Ok(Session::new(
            client,
            self.credentials.clone(),
            tokens,
            config::spotify_apiurl(),
            token_url,
        ))
    }

    async fn cached_tokens(&self, client: &Client, token_url: &str) -> Option<TokenManager> {
        let mut tokens = match TokenManager::load(&self.cache_path).await {
            Ok(tokens) => tokens,
            Err(_) => {
                info!("No authorization cache at {}", self.cache_path.display());
                return None;
            }
        };

        if !utils::scope_covers(&tokens.current_token().scope, config::SCOPE) {
            warning!("Cached token lacks required scope, re-authorizing");
            return None;
        }

        match tokens
            .get_valid_token(client, &self.credentials, token_url)
            .await
        {
            Ok(_) => Some(tokens),
            Err(e) => {
                warning!("Cached token could not be refreshed: {}", e);
                None
            }
        }
    }
}

/// Client with the transport timeout applied to every request.
pub fn http_client() -> Res<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| Error::Authentication(format!("cannot build HTTP client: {}", e)))
}

/// Runs the authorization-code flow through the browser.
///
/// 1. Binds a callback server to the host, port and path of the redirect URI
/// 2. Opens the authorize URL, or prints it when no browser can be launched
/// 3. Waits for the callback handler to exchange the code for a token
async fn authorize(client: &Client, credentials: &Credentials, token_url: &str) -> Res<Token> {
    let target = utils::callback_target(&credentials.redirect_uri).map_err(Error::Authentication)?;

    let listener = tokio::net::TcpListener::bind((target.host.as_str(), target.port))
        .await
        .map_err(|e| {
            Error::Authentication(format!(
                "cannot bind callback server to {}:{}: {}",
                target.host, target.port, e
            ))
        })?;

    let state = utils::generate_state();
    let shared_state = Arc::new(Mutex::new(Some(PendingAuth {
        state: state.clone(),
        client: client.clone(),
        credentials: credentials.clone(),
        token_url: token_url.to_string(),
        outcome: None,
    })));

    let server_state = Arc::clone(&shared_state);
    let callback_path = target.path.clone();
    let server = tokio::spawn(async move {
        start_api_server(listener, callback_path, server_state).await;
    });

    let auth_url = utils::authorize_url(
        &config::spotify_apiauth_url(),
        credentials,
        config::SCOPE,
        &state,
    );

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for authorization in the browser...");
    }

    let outcome = wait_for_token(shared_state).await;
    server.abort();

    match outcome {
        Some(Ok(token)) => Ok(token),
        Some(Err(e)) => Err(Error::Authentication(e)),
        None => Err(Error::Authentication(
            "timed out waiting for the authorization callback".to_string(),
        )),
    }
}

/// Polls the shared state until the callback stored an outcome or the
/// timeout elapses.
async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PendingAuth>>>,
) -> Option<Result<Token, String>> {
    let start = Instant::now();

    while start.elapsed() < CALLBACK_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(outcome) = lock.as_ref().and_then(|pending| pending.outcome.clone()) {
            return Some(outcome);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    None
}

/// Exchanges an authorization code for a token.
///
/// The client id and secret are sent as HTTP basic auth.
pub async fn exchange_code(
    client: &Client,
    credentials: &Credentials,
    token_url: &str,
    code: &str,
) -> Res<Token> {
    let response = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", credentials.redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::Authentication(format!("token exchange failed: {}", e)))?;

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Authentication(format!("malformed token response: {}", e)))?;

    Ok(into_token(body, String::new()))
}

/// Refreshes `current` with its refresh token.
///
/// Spotify may omit the refresh token in the response, in which case the old
/// one is kept.
pub async fn refresh_token(
    client: &Client,
    credentials: &Credentials,
    token_url: &str,
    current: &Token,
) -> Res<Token> {
    if current.refresh_token.is_empty() {
        return Err(Error::Authentication(
            "no refresh token available".to_string(),
        ));
    }

    let response = client
        .post(token_url)
        .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", current.refresh_token.as_str()),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::Authentication(format!("token refresh failed: {}", e)))?;

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| Error::Authentication(format!("malformed token response: {}", e)))?;

    let mut token = into_token(body, current.refresh_token.clone());
    if token.scope.is_empty() {
        token.scope = current.scope.clone();
    }
    Ok(token)
}

fn into_token(body: TokenResponse, fallback_refresh: String) -> Token {
    Token {
        access_token: body.access_token,
        refresh_token: body.refresh_token.unwrap_or(fallback_refresh),
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
