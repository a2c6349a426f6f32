use std::{fs, path::PathBuf};

use topspot::Error;
use topspot::config::{self, load_credentials};

// Writes `contents` to a fresh file under the system temp dir.
fn write_config(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("topspot-config-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.ini");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_credentials() {
    let path = write_config(
        "valid",
        "[api]\nCLIENT_ID = abc\nCLIENT_SECRET = def\nREDIRECT_URI = http://127.0.0.1:8888/callback\n",
    );

    let credentials = load_credentials(&path).unwrap();

    assert_eq!(credentials.client_id, "abc");
    assert_eq!(credentials.client_secret, "def");
    assert_eq!(credentials.redirect_uri, "http://127.0.0.1:8888/callback");
}

#[test]
fn test_load_credentials_ignores_key_case_and_other_sections() {
    let path = write_config(
        "case",
        "[other]\nclient_id = wrong\n\n[api]\nclient_id = abc\nClient_Secret = def\nredirect_uri = http://localhost:9000/cb\n",
    );

    let credentials = load_credentials(&path).unwrap();

    assert_eq!(credentials.client_id, "abc");
    assert_eq!(credentials.client_secret, "def");
    assert_eq!(credentials.redirect_uri, "http://localhost:9000/cb");
}

#[test]
fn test_missing_file_is_configuration_error() {
    let path = std::env::temp_dir().join("topspot-config-does-not-exist/config.ini");

    let err = load_credentials(&path).unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_missing_section_is_configuration_error() {
    let path = write_config("section", "[spotify]\nCLIENT_ID = abc\n");

    match load_credentials(&path) {
        Err(Error::Configuration(msg)) => assert!(msg.contains("[api]")),
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_missing_key_is_configuration_error() {
    let path = write_config("key", "[api]\nCLIENT_ID = abc\nCLIENT_SECRET = def\n");

    match load_credentials(&path) {
        Err(Error::Configuration(msg)) => assert!(msg.contains("REDIRECT_URI")),
        other => panic!("expected configuration error, got {:?}", other),
    }
}

#[test]
fn test_empty_value_is_configuration_error() {
    let path = write_config(
        "empty",
        "[api]\nCLIENT_ID =\nCLIENT_SECRET = def\nREDIRECT_URI = http://127.0.0.1:8888/callback\n",
    );

    let err = load_credentials(&path).unwrap_err();
    assert!(err.to_string().contains("CLIENT_ID"));
}

#[test]
fn test_explicit_config_path_wins() {
    let explicit = PathBuf::from("/tmp/explicit.ini");
    assert_eq!(config::config_path(Some(explicit.clone())), explicit);
}

#[test]
fn test_scope_is_fixed() {
    assert_eq!(config::SCOPE, "user-top-read playlist-modify-public");
}
