//! # CLI Module
//!
//! User-facing commands. Each command loads the credentials, authenticates,
//! and prints its result; configuration and authentication failures end the
//! program with a message.
//!
//! - [`auth`] - Runs the authorization flow (or reuses the cache) and reports
//!   the granted scope
//! - [`tracks`] - Prints the listener's top tracks as a table
//! - [`artists`] - Prints the listener's top artists as a table
//!
//! ```bash
//! topspot auth
//! topspot tracks --limit 120 --time-range short_term
//! topspot artists --limit 10
//! ```

mod auth;
mod top;

pub use auth::auth;
pub use top::artists;
pub use top::tracks;
