use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::auth::authenticator,
    error,
    spotify::top::{self, EmptyReason, TopItems},
    types::TimeRange,
    success, utils, warning,
};

pub async fn tracks(config_path: Option<PathBuf>, limit: u32, time_range: TimeRange) {
    let mut authenticator = authenticator(config_path);
    let session = match authenticator.authenticate().await {
        Ok(s) => s,
        Err(e) => error!("{}. Please run topspot auth", e),
    };

    let pb = spinner(format!("Fetching top tracks ({})...", time_range));
    let result = top::top_tracks(session, limit, time_range).await;
    pb.finish_and_clear();

    match result {
        TopItems::Found(tracks) => {
            success!("{} top tracks retrieved", tracks.len());
            println!("{}", Table::new(utils::track_rows(&tracks)));
        }
        TopItems::Empty(reason) => report_empty("tracks", reason),
    }
}

pub async fn artists(config_path: Option<PathBuf>, limit: u32, time_range: TimeRange) {
    let mut authenticator = authenticator(config_path);
    let session = match authenticator.authenticate().await {
        Ok(s) => s,
        Err(e) => error!("{}. Please run topspot auth", e),
    };

    let pb = spinner(format!("Fetching top artists ({})...", time_range));
    let result = top::top_artists(session, limit, time_range).await;
    pb.finish_and_clear();

    match result {
        TopItems::Found(artists) => {
            success!("{} top artists retrieved", artists.len());
            println!("{}", Table::new(utils::artist_rows(&artists)));
        }
        TopItems::Empty(reason) => report_empty("artists", reason),
    }
}

fn report_empty(kind: &str, reason: EmptyReason) {
    match reason {
        EmptyReason::NoHistory => warning!("Spotify has no top {} for you yet.", kind),
        EmptyReason::Failed(e) => error!("Could not fetch top {}. Err: {}", kind, e),
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
