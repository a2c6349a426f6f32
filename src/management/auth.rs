use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::Client;

use crate::{Error, Res, spotify, types::Credentials, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load(path: &Path) -> Result<Self, String> {
        let content = async_fs::read_to_string(path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(
        &mut self,
        client: &Client,
        credentials: &Credentials,
        token_url: &str,
    ) -> Res<String> {
        if self.is_expired() {
            let new_token =
                spotify::auth::refresh_token(client, credentials, token_url, &self.token).await?;
            self.token = new_token;
            self.persist().await.map_err(Error::Authentication)?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now.saturating_add(EXPIRY_MARGIN)
            >= self.token.obtained_at.saturating_add(self.token.expires_in)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
