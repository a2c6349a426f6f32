use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify::auth::exchange_code, types::PendingAuth, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingAuth>>>>,
) -> Html<&'static str> {
    // lock is not held across the token exchange
    let (client, credentials, token_url, code) = {
        let mut state = shared_state.lock().await;
        let Some(pending) = state.as_mut() else {
            return Html("<h4>No authorization in progress.</h4>");
        };

        if let Some(reason) = params.get("error") {
            pending.outcome = Some(Err(format!("authorization declined: {}", reason)));
            return Html("<h4>Authorization declined.</h4>");
        }

        if params.get("state") != Some(&pending.state) {
            pending.outcome = Some(Err("state mismatch in authorization callback".to_string()));
            return Html("<h4>Invalid authorization state.</h4>");
        }

        let Some(code) = params.get("code") else {
            pending.outcome = Some(Err("missing authorization code".to_string()));
            return Html("<h4>Missing authorization code.</h4>");
        };

        (
            pending.client.clone(),
            pending.credentials.clone(),
            pending.token_url.clone(),
            code.clone(),
        )
    };

    let outcome = exchange_code(&client, &credentials, &token_url, &code).await;

    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    match outcome {
        Ok(token) => {
            pending.outcome = Some(Ok(token));
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            pending.outcome = Some(Err(e.to_string()));
            Html("<h4>Login failed.</h4>")
        }
    }
}
