use std::collections::HashSet;

use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

use crate::types::{
    Artist, ArtistTableRow, Credentials, TimeRange, Track, TrackTableRow,
};

/// Where the local callback server has to listen, derived from the redirect
/// URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTarget {
    pub host: String,
    pub port: u16,
    pub path: String,
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn callback_target(redirect_uri: &str) -> Result<CallbackTarget, String> {
    let url = Url::parse(redirect_uri)
        .map_err(|e| format!("invalid redirect URI '{}': {}", redirect_uri, e))?;

    if url.scheme() != "http" {
        return Err(format!(
            "redirect URI '{}' must use http to be served locally",
            redirect_uri
        ));
    }

    let host = url
        .host_str()
        .ok_or_else(|| format!("redirect URI '{}' has no host", redirect_uri))?
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();

    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("redirect URI '{}' has no port", redirect_uri))?;

    let path = match url.path() {
        "" => "/".to_string(),
        p => p.to_string(),
    };

    Ok(CallbackTarget { host, port, path })
}

pub fn authorize_url(base: &str, credentials: &Credentials, scope: &str, state: &str) -> String {
    let params = [
        ("client_id", credentials.client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", credentials.redirect_uri.as_str()),
        ("scope", scope),
        ("state", state),
    ];

    match Url::parse_with_params(base, &params) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{base}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
            base = base,
            client_id = credentials.client_id,
            redirect_uri = credentials.redirect_uri,
            scope = scope.replace(' ', "%20"),
            state = state
        ),
    }
}

/// Whether every scope in `requested` was granted.
pub fn scope_covers(granted: &str, requested: &str) -> bool {
    let granted: HashSet<&str> = granted.split_whitespace().collect();
    requested
        .split_whitespace()
        .all(|scope| granted.contains(scope))
}

pub fn parse_time_range(s: &str) -> Result<TimeRange, String> {
    s.parse()
}

pub fn join_artist_names(track: &Track) -> String {
    if track.artists.is_empty() {
        return "Unknown".to_string();
    }

    track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            rank: i + 1,
            name: t.name.clone(),
            artists: join_artist_names(t),
        })
        .collect()
}

pub fn artist_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .enumerate()
        .map(|(i, a)| ArtistTableRow {
            rank: i + 1,
            name: a.name.clone(),
            genres: a.genres.iter().take(3).cloned().collect::<Vec<_>>().join(","),
        })
        .collect()
}
