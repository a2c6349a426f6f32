//! # API Module
//!
//! HTTP endpoints served by the temporary local server that runs while the
//! authorization-code flow is in progress.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives Spotify's redirect, checks the `state` parameter
//!   and exchanges the authorization code for a token. A user who declines
//!   consent arrives here with an `error` parameter instead of a code.
//! - [`health`] - Returns status and version information.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use topspot::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
