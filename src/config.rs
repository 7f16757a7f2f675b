//! Configuration management for Concertista.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Everything except the Spotify client id
//! has a working default:
//!
//! | Variable                       | Default                                     |
//! |--------------------------------|---------------------------------------------|
//! | `SERVER_ADDRESS`               | `127.0.0.1:9182`                            |
//! | `SPOTIFY_API_AUTH_CLIENT_ID`   | required                                    |
//! | `SPOTIFY_API_REDIRECT_URI`     | `http://127.0.0.1:9182/callback`            |
//! | `SPOTIFY_API_AUTH_SCOPE`       | playback read/modify scopes                 |
//! | `SPOTIFY_API_AUTH_URL`         | `https://accounts.spotify.com/authorize`    |
//! | `SPOTIFY_API_TOKEN_URL`        | `https://accounts.spotify.com/api/token`    |
//! | `SPOTIFY_API_URL`              | `https://api.spotify.com/v1`                |
//! | `CONCERTISTA_MUSIC_DIR`        | `<data dir>/concertista/music`              |
//! | `CONCERTISTA_MARKET`           | `US`                                        |
//! | `CONCERTISTA_STATION_CAPACITY` | `200`                                       |

use std::{env, path::PathBuf};

pub const APP_DIR: &str = "concertista";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:9182";
pub const DEFAULT_SCOPE: &str =
    "user-read-playback-state user-modify-playback-state user-read-currently-playing";

/// At an average of five minutes per track this is about sixteen hours.
pub const DEFAULT_STATION_CAPACITY: usize = 200;

/// Loads environment variables from `<data dir>/concertista/.env`.
///
/// Creates the directory on first run. A missing `.env` file is fine since
/// the variables may come from the process environment instead; a file that
/// exists but cannot be parsed is an error.
///
/// - Linux: `~/.local/share/concertista/.env`
/// - macOS: `~/Library/Application Support/concertista/.env`
/// - Windows: `%LOCALAPPDATA%/concertista/.env`
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    Ok(())
}

/// Platform data directory of the application.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Address the local OAuth callback listener binds to.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Client id of the application registered with Spotify.
///
/// There is no sensible default, so a missing value is reported to the
/// caller.
pub fn spotify_client_id() -> Result<String, String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            format!(
                "SPOTIFY_API_AUTH_CLIENT_ID must be set (environment or {})",
                data_dir().join(".env").display()
            )
        })
}

/// Callback URL registered for the application; must point at
/// [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    var_or(
        "SPOTIFY_API_REDIRECT_URI",
        &format!("http://{}/callback", server_addr()),
    )
}

pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

pub fn spotify_apitoken_url() -> String {
    var_or(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

/// Root of the composer/piece catalog.
pub fn music_dir() -> PathBuf {
    env::var("CONCERTISTA_MUSIC_DIR")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("music"))
}

/// Market used to relink tracks and filter album listings.
pub fn market() -> String {
    var_or("CONCERTISTA_MARKET", "US")
}

/// Upper bound on the number of tracks queued per station.
pub fn station_capacity() -> usize {
    env::var("CONCERTISTA_STATION_CAPACITY")
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_STATION_CAPACITY)
}
