//! Concertista
//!
//! Plays random "stations" of classical music on Spotify. Pieces (a work
//! made of one or more tracks) come from a local flat-file catalog; a
//! station shuffles the chosen pieces, keeps each piece's tracks in order
//! and queues at most a fixed number of tracks on the user's active device.
//!
//! # Modules
//!
//! - `catalog` - composer and piece records loaded from YAML files
//! - `station` - random station assembly and start-up
//! - `search` - lookup of composers and pieces by name
//! - `spotify` - Web API remote, PKCE authorization, album listings
//! - `server` / `api` - local OAuth callback listener
//! - `management` - token cache and persisted preferences
//! - `player` - device choice and volume stepping
//! - `cli` - command implementations
//! - `config` - environment configuration
//! - `types` - records and Web API shapes
//! - `utils` - PKCE helpers and small formatting helpers

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod management;
pub mod player;
pub mod search;
pub mod server;
pub mod spotify;
pub mod station;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Boxes any error that is `Send + Sync` so flows that mix reqwest, I/O
/// and string errors can use `?` throughout.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use concertista::Res;
///
/// async fn client_id() -> Res<String> {
///     Ok(concertista::config::spotify_client_id()?)
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational line with a blue `o` marker to stdout.
///
/// Used for progress and state reports that need no action from the user,
/// like the track that is playing or the number of search matches.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Waiting for Spotify authorization in your browser...");
/// info!("Volume {}%", volume);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a green check line to stdout once an operation completed.
///
/// # Arguments
///
/// Same as `println!`.
///
/// # Example
///
/// ```
/// success!("Queued {} tracks from {} pieces.", tracks, pieces);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a yellow `!` line to stderr. The program keeps running.
///
/// Used for problems the user should see but that do not stop the current
/// command, like a skipped catalog file or a missing playback device.
///
/// # Arguments
///
/// Same as `eprintln!`.
///
/// # Example
///
/// ```
/// warning!("Skipping piece file {}: {}", path.display(), e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Evaluates to `!`, so it can end a `match` arm of any type. Only for
/// failures the current command cannot recover from.
///
/// # Arguments
///
/// Same as `eprintln!`.
///
/// # Example
///
/// ```
/// let catalog = match Catalog::load(&root) {
///     Ok(catalog) => catalog,
///     Err(e) => error!("Cannot load the music catalog: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
