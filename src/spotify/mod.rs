//! # Spotify Integration Module
//!
//! Everything that talks to Spotify lives here:
//!
//! ```text
//! CLI Layer
//!     ↓
//! Spotify Integration Layer
//!     ├── auth     (authorization-code flow, token refresh, session ownership)
//!     ├── session  (authenticated HTTP handle to the Web API)
//!     └── top      (paged top tracks / top artists aggregation)
//!     ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Endpoints used
//!
//! - `GET /me/top/tracks` and `GET /me/top/artists` with `limit`, `offset`
//!   and `time_range`
//! - `GET /authorize` (browser) and `POST /api/token` on the accounts service
//!
//! ## Error Types
//!
//! Authentication problems surface as [`crate::Error::Authentication`]. Failed
//! top-items requests are folded into [`top::TopItems::Empty`] by the
//! aggregator and never retried.

pub mod auth;
pub mod session;
pub mod top;
