//! # API Module
//!
//! HTTP endpoints of the local authorization callback listener.
//!
//! - [`callback`] - receives Spotify's OAuth redirect, exchanges the code
//!   with the PKCE verifier and hands the token to the waiting flow
//! - [`health`] - liveness probe with the crate version
//!
//! Routing lives in [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
