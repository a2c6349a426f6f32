use std::{fs, path::PathBuf};

use chrono::Utc;
use topspot::Error;
use topspot::config::SCOPE;
use topspot::management::TokenManager;
use topspot::spotify::auth::Authenticator;
use topspot::types::{Credentials, Token};

fn credentials(redirect_uri: &str) -> Credentials {
    Credentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: redirect_uri.to_string(),
    }
}

fn cache_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("topspot-auth-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir.join("cache").join("token.json")
}

fn token(scope: &str, obtained_at: u64, refresh_token: &str) -> Token {
    Token {
        access_token: "access".to_string(),
        refresh_token: refresh_token.to_string(),
        scope: scope.to_string(),
        expires_in: 3600,
        obtained_at,
    }
}

fn write_token(path: &PathBuf, token: &Token) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(token).unwrap()).unwrap();
}

fn now() -> u64 {
    Utc::now().timestamp() as u64
}

#[tokio::test]
async fn test_cached_token_builds_session_once() {
    let path = cache_path("cached");
    write_token(&path, &token(SCOPE, now(), "refresh"));

    let mut authenticator =
        Authenticator::new(credentials("http://127.0.0.1:8888/callback")).with_cache_path(path);

    let first = authenticator.authenticate().await.unwrap() as *const _;
    assert!(authenticator.is_authenticated());

    let second = authenticator.authenticate().await.unwrap() as *const _;
    assert_eq!(first, second);

    let session = authenticator.session().unwrap();
    assert_eq!(session.access_token().await.unwrap(), "access");
}

#[tokio::test]
async fn test_reset_forces_new_session() {
    let path = cache_path("reset");
    write_token(&path, &token(SCOPE, now(), "refresh"));

    let mut authenticator =
        Authenticator::new(credentials("http://127.0.0.1:8888/callback")).with_cache_path(path);

    authenticator.authenticate().await.unwrap();
    authenticator.reset();
    assert!(!authenticator.is_authenticated());

    authenticator.authenticate().await.unwrap();
    assert!(authenticator.is_authenticated());
}

#[tokio::test]
async fn test_failed_authentication_leaves_authenticator_unauthenticated() {
    let path = cache_path("failed");
    let mut authenticator =
        Authenticator::new(credentials("not a redirect uri")).with_cache_path(path);

    let err = authenticator.authenticate().await.err().unwrap();
    assert!(matches!(err, Error::Authentication(_)));
    assert!(!authenticator.is_authenticated());

    // a second attempt starts over and fails the same way
    let err = authenticator.authenticate().await.err().unwrap();
    assert!(matches!(err, Error::Authentication(_)));
    assert!(authenticator.session().is_none());
}

#[tokio::test]
async fn test_cached_token_without_required_scope_is_ignored() {
    let path = cache_path("scope");
    write_token(&path, &token("user-top-read", now(), "refresh"));

    let mut authenticator =
        Authenticator::new(credentials("ftp://127.0.0.1/callback")).with_cache_path(path);

    assert!(authenticator.authenticate().await.is_err());
    assert!(!authenticator.is_authenticated());
}

#[tokio::test]
async fn test_expired_token_without_refresh_token_is_ignored() {
    let path = cache_path("expired");
    write_token(&path, &token(SCOPE, now() - 7200, ""));

    let mut authenticator =
        Authenticator::new(credentials("not a redirect uri")).with_cache_path(path);

    assert!(matches!(
        authenticator.authenticate().await.err(),
        Some(Error::Authentication(_))
    ));
}

#[tokio::test]
async fn test_token_manager_persist_and_load() {
    let path = cache_path("persist");
    let manager = TokenManager::new(token(SCOPE, now(), "refresh"), path.clone());
    manager.persist().await.unwrap();

    let loaded = TokenManager::load(&path).await.unwrap();
    assert_eq!(loaded.current_token().access_token, "access");
    assert_eq!(loaded.current_token().scope, SCOPE);
    assert_eq!(loaded.path(), path.as_path());
    assert!(!loaded.is_expired());
}

#[test]
fn test_token_expiry_margin() {
    let fresh = TokenManager::new(token(SCOPE, now(), "r"), PathBuf::from("unused"));
    assert!(!fresh.is_expired());

    // within four minutes of expiry counts as expired
    let almost = TokenManager::new(token(SCOPE, now() - 3500, "r"), PathBuf::from("unused"));
    assert!(almost.is_expired());
}

#[test]
fn test_token_expiry_with_out_of_range_timestamps() {
    let mut far = token(SCOPE, u64::MAX, "r");
    far.expires_in = u64::MAX;
    let manager = TokenManager::new(far, PathBuf::from("unused"));
    assert!(!manager.is_expired());

    let mut ancient = token(SCOPE, 0, "r");
    ancient.expires_in = 0;
    let manager = TokenManager::new(ancient, PathBuf::from("unused"));
    assert!(manager.is_expired());
}
