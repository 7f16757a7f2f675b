//! # Spotify Integration Module
//!
//! Remote control of the user's Spotify player through the Web API. The rest
//! of the crate only talks to the [`PlaybackRemote`] trait; [`SpotifyClient`]
//! is its reqwest-backed implementation.
//!
//! ```text
//! CLI / station orchestration
//!          ↓
//! PlaybackRemote (trait)
//!          ↓
//! SpotifyClient ── TokenManager (cached token, refresh)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow; the local callback listener in
//!   [`crate::server`] hands the exchanged token back over a one-shot channel
//! - [`client`] - player endpoints (`/me/player/...`) and the profile lookup
//! - [`albums`] - artist album and album track listings used by the piece
//!   authoring commands
//!
//! ## Endpoints
//!
//! - `GET /me/player` - current playback, `204` when idle
//! - `PUT /me/player/play` - start a queue of track URIs, or resume
//! - `PUT /me/player/pause`, `POST /me/player/next`, `POST /me/player/previous`
//! - `PUT /me/player/volume` - volume in percent
//! - `PUT /me/player` - transfer playback to a device
//! - `GET /me/player/devices` - available devices
//! - `GET /artists/{id}/albums`, `GET /albums/{id}/tracks`
//!
//! Failures surface as [`RemoteError`]. Nothing is retried: a failed command
//! is reported to the user and dropped.

pub mod albums;
pub mod auth;
pub mod client;
mod error;
mod remote;

pub use client::SpotifyClient;
pub use error::RemoteError;
pub use remote::PlaybackRemote;
