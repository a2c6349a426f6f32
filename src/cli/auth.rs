use std::path::PathBuf;

use crate::{config, error, spotify::auth::Authenticator, success};

/// Loads the credentials from `config_path` and builds an authenticator.
///
/// A configuration error is fatal and terminates the program.
pub fn authenticator(config_path: Option<PathBuf>) -> Authenticator {
    let path = config::config_path(config_path);
    match config::load_credentials(&path) {
        Ok(credentials) => Authenticator::new(credentials),
        Err(e) => error!("{}", e),
    }
}

pub async fn auth(config_path: Option<PathBuf>) {
    let mut authenticator = authenticator(config_path);
    match authenticator.authenticate().await {
        Ok(session) => {
            let scope = session.scope().await;
            success!("Connected to Spotify with scope: {}", scope);
        }
        Err(e) => error!("{}", e),
    }
}
