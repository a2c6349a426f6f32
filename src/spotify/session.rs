use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res,
    management::TokenManager,
    spotify::top::TopItemsSource,
    types::{Credentials, Page, PageRequest, TopItem},
};

/// Authenticated handle to the Spotify Web API.
///
/// Created by [`crate::spotify::auth::Authenticator::authenticate`]. The token
/// manager sits behind a mutex so an expired token can be refreshed through a
/// shared reference.
pub struct Session {
    client: Client,
    credentials: Credentials,
    api_url: String,
    token_url: String,
    tokens: Mutex<TokenManager>,
}

impl Session {
    pub fn new(
        client: Client,
        credentials: Credentials,
        tokens: TokenManager,
        api_url: String,
        token_url: String,
    ) -> Self {
        Self {
            client,
            credentials,
            api_url: api_url.trim_end_matches('/').to_string(),
            token_url,
            tokens: Mutex::new(tokens),
        }
    }

    /// Returns a bearer token, refreshing the cached one if it expired.
    pub async fn access_token(&self) -> Res<String> {
        self.tokens
            .lock()
            .await
            .get_valid_token(&self.client, &self.credentials, &self.token_url)
            .await
    }

    pub async fn scope(&self) -> String {
        self.tokens.lock().await.current_token().scope.clone()
    }
}

impl TopItemsSource for Session {
    async fn top_page<T: TopItem>(&self, request: &PageRequest) -> Res<Page<T>> {
        let token = self.access_token().await?;
        let api_url = format!(
            "{uri}/me/top/{kind}?limit={limit}&offset={offset}&time_range={time_range}",
            uri = self.api_url,
            kind = T::KIND.path(),
            limit = request.limit,
            offset = request.offset,
            time_range = request.time_range,
        );

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Page<T>>().await?)
    }
}
