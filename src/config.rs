//! Configuration management for topspot.
//!
//! Secrets live in an INI file with an `[api]` section holding `CLIENT_ID`,
//! `CLIENT_SECRET` and `REDIRECT_URI`. Paths and Spotify endpoints can be
//! overridden through environment variables, which may in turn come from a
//! `.env` file in the local data directory:
//!
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{
    env,
    path::{Path, PathBuf},
};

use ini::Ini;

use crate::{Error, Res, types::Credentials};

/// Permissions requested during authorization.
pub const SCOPE: &str = "user-top-read playlist-modify-public";

/// Section of the config file holding the API secrets.
pub const API_SECTION: &str = "api";

const APP_DIR: &str = "topspot";

/// Loads environment variables from `<data_local_dir>/topspot/.env`.
///
/// A missing file is not an error, every setting has a default. A file that
/// exists but cannot be parsed is reported.
///
/// # Example
///
/// ```
/// use topspot::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Res<()> {
    let path = data_dir().join(".env");
    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| Error::Configuration(format!("cannot load {}: {}", path.display(), e)))
}

/// Reads the three API secrets from the `[api]` section of an INI file.
///
/// Key lookup ignores ASCII case. Empty values count as missing.
///
/// # Errors
///
/// Returns [`Error::Configuration`] when the file cannot be read or parsed,
/// the section is absent, or any of the keys is absent.
///
/// # Example
///
/// ```
/// let credentials = load_credentials("config.ini")?;
/// println!("{}", credentials.redirect_uri);
/// ```
pub fn load_credentials<P: AsRef<Path>>(path: P) -> Res<Credentials> {
    let path = path.as_ref();
    let conf = Ini::load_from_file(path).map_err(|e| {
        Error::Configuration(format!("cannot read {}: {}", path.display(), e))
    })?;

    let section = conf.section(Some(API_SECTION)).ok_or_else(|| {
        Error::Configuration(format!(
            "section [{}] missing in {}",
            API_SECTION,
            path.display()
        ))
    })?;

    let get = |key: &str| -> Res<String> {
        section
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "key {} missing in section [{}] of {}",
                    key,
                    API_SECTION,
                    path.display()
                ))
            })
    };

    Ok(Credentials {
        client_id: get("CLIENT_ID")?,
        client_secret: get("CLIENT_SECRET")?,
        redirect_uri: get("REDIRECT_URI")?,
    })
}

/// Resolves the config file location.
///
/// An explicit path wins, then `TOPSPOT_CONFIG`, then
/// `<data_local_dir>/topspot/config.ini`.
pub fn config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var("TOPSPOT_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| data_dir().join("config.ini"))
}

/// Location of the authorization cache, `TOPSPOT_CACHE_PATH` or
/// `<data_local_dir>/topspot/cache/token.json`.
pub fn token_cache_path() -> PathBuf {
    env::var("TOPSPOT_CACHE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("cache").join("token.json"))
}

/// Returns the Spotify Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
