//! Spotify Top Items CLI Library
//!
//! This library authenticates against the Spotify Web API and retrieves the
//! listener's most-played tracks and artists, paging past the API's 50 item
//! cap per request.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Credential loading and runtime settings
//! - `error` - Error taxonomy shared by all modules
//! - `management` - Authorization cache handling
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API session and top-items aggregation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use topspot::{config, spotify::{auth::Authenticator, top}, types::TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> topspot::Res<()> {
//!     let credentials = config::load_credentials(config::config_path(None))?;
//!     let mut authenticator = Authenticator::new(credentials);
//!     let session = authenticator.authenticate().await?;
//!     let tracks = top::top_tracks(session, 20, TimeRange::LongTerm).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// All fallible operations in this crate report one of the [`Error`] kinds.
///
/// # Example
///
/// ```
/// use topspot::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Fetched {} artists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only the CLI
/// layer uses this macro; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a failed page request that turns a
/// fetch into an empty result.
///
/// # Example
///
/// ```
/// warning!("Token cache not found, starting authorization flow");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
