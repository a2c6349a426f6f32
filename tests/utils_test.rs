use serde_json::json;
use topspot::types::{Artist, Credentials, TimeRange, Track};
use topspot::utils::*;

// Helper function to create a test track
fn create_test_track(name: &str, artists: &[&str]) -> Track {
    serde_json::from_value(json!({
        "name": name,
        "artists": artists.iter().map(|a| json!({ "name": a })).collect::<Vec<_>>()
    }))
    .unwrap()
}

fn create_test_artist(name: &str, genres: &[&str]) -> Artist {
    serde_json::from_value(json!({ "name": name, "genres": genres })).unwrap()
}

#[test]
fn test_generate_state() {
    let state = generate_state();

    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_callback_target() {
    let target = callback_target("http://127.0.0.1:8888/callback").unwrap();
    assert_eq!(target.host, "127.0.0.1");
    assert_eq!(target.port, 8888);
    assert_eq!(target.path, "/callback");

    // default port and root path
    let target = callback_target("http://localhost").unwrap();
    assert_eq!(target.host, "localhost");
    assert_eq!(target.port, 80);
    assert_eq!(target.path, "/");

    let target = callback_target("http://[::1]:9000/cb").unwrap();
    assert_eq!(target.host, "::1");
    assert_eq!(target.port, 9000);
}

#[test]
fn test_callback_target_rejects_unusable_uris() {
    assert!(callback_target("not a uri").is_err());
    assert!(callback_target("https://example.com/callback").is_err());
}

#[test]
fn test_authorize_url() {
    let credentials = Credentials {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
    };

    let url = authorize_url(
        "https://accounts.spotify.com/authorize",
        &credentials,
        "user-top-read playlist-modify-public",
        "xyz",
    );

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=client"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains("scope=user-top-read+playlist-modify-public"));
    assert!(url.contains("state=xyz"));
    assert!(!url.contains("secret"));
}

#[test]
fn test_scope_covers() {
    let requested = "user-top-read playlist-modify-public";

    assert!(scope_covers("playlist-modify-public user-top-read", requested));
    assert!(scope_covers(
        "user-top-read user-read-email playlist-modify-public",
        requested
    ));
    assert!(!scope_covers("user-top-read", requested));
    assert!(!scope_covers("", requested));
}

#[test]
fn test_parse_time_range() {
    assert_eq!(parse_time_range("short_term"), Ok(TimeRange::ShortTerm));
    assert_eq!(parse_time_range("medium-term"), Ok(TimeRange::MediumTerm));
    assert_eq!(parse_time_range("LONG_TERM"), Ok(TimeRange::LongTerm));
    assert_eq!(parse_time_range("long"), Ok(TimeRange::LongTerm));
    assert!(parse_time_range("forever").is_err());

    assert_eq!(TimeRange::default(), TimeRange::LongTerm);
    assert_eq!(TimeRange::MediumTerm.to_string(), "medium_term");
}

#[test]
fn test_join_artist_names() {
    let track = create_test_track("Song", &["A", "B"]);
    assert_eq!(join_artist_names(&track), "A, B");

    let track = create_test_track("Song", &[]);
    assert_eq!(join_artist_names(&track), "Unknown");
}

#[test]
fn test_track_rows_are_ranked_in_order() {
    let tracks = vec![
        create_test_track("Song 1", &["Artist 1"]),
        create_test_track("Song 2", &["Artist 2", "Artist 3"]),
    ];

    let rows = track_rows(&tracks);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].name, "Song 1");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].artists, "Artist 2, Artist 3");
}

#[test]
fn test_artist_rows_limit_genres() {
    let artists = vec![create_test_artist(
        "Artist 1",
        &["rock", "indie", "pop", "jazz"],
    )];

    let rows = artist_rows(&artists);

    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].genres, "rock,indie,pop");
}
