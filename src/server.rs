use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, types::PendingAuth, warning};

/// Serves the OAuth callback on `callback_path` until the task is aborted.
pub async fn start_api_server(
    listener: TcpListener,
    callback_path: String,
    state: Arc<Mutex<Option<PendingAuth>>>,
) {
    let mut app = Router::new().route(&callback_path, get(api::callback).layer(Extension(state)));
    if callback_path != "/health" {
        app = app.route("/health", get(api::health));
    }

    if let Err(e) = axum::serve(listener, app).await {
        warning!("Callback server stopped: {}", e);
    }
}
