//! # CLI Module
//!
//! Command implementations behind the `concertista` binary. Each command
//! prints its own feedback through the crate's status macros; fatal
//! problems (no catalog, no Spotify connection) end the process with
//! [`error!`](crate::error).
//!
//! ## Commands
//!
//! - [`auth`] - run the PKCE authorization flow and cache the token
//! - [`now`], [`toggle`], [`next`], [`previous`], [`volume`] - player control
//! - [`devices`], [`device`] - list devices and transfer playback
//! - [`new_station`], [`composer_station`], [`piece_station`],
//!   [`search_station`] - start a random station
//! - [`composers`], [`pieces`] - browse the catalog
//! - [`library`], [`select`], [`deselect`], [`selection`], [`clear_selection`]
//!   - curate what `station new` plays
//! - [`albums`], [`tracks`], [`create_piece`] - author new piece files
//!
//! ## Typical session
//!
//! ```bash
//! concertista auth
//! concertista devices
//! concertista station new
//! concertista station search "goldberg"
//! concertista volume up
//! ```

mod auth;
mod catalog;
mod piece;
mod player;
mod prefs;
mod station;

pub use auth::auth;
pub use catalog::composers;
pub use catalog::pieces;
pub use piece::albums;
pub use piece::create_piece;
pub use piece::tracks;
pub use player::device;
pub use player::devices;
pub use player::next;
pub use player::now;
pub use player::previous;
pub use player::toggle;
pub use player::volume;
pub use prefs::clear_selection;
pub use prefs::deselect;
pub use prefs::library;
pub use prefs::select;
pub use prefs::selection;
pub use station::composer_station;
pub use station::new_station;
pub use station::piece_station;
pub use station::search_station;

use crate::{
    catalog::Catalog,
    config, error,
    management::SettingsManager,
    spotify::{self, PlaybackRemote, SpotifyClient},
    types::Device,
    warning,
};

fn load_catalog() -> Catalog {
    let root = config::music_dir();
    match Catalog::load(&root) {
        Ok(catalog) => {
            if !catalog.rejected().is_empty() {
                warning!(
                    "{} piece file(s) could not be loaded from {}",
                    catalog.rejected().len(),
                    root.display()
                );
            }
            catalog
        }
        Err(e) => error!(
            "Cannot load the music catalog: {}\nSet CONCERTISTA_MUSIC_DIR to your catalog directory.",
            e
        ),
    }
}

async fn load_settings() -> SettingsManager {
    match SettingsManager::load().await {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load settings: {}", e),
    }
}

async fn connect() -> SpotifyClient {
    match spotify::auth::connect().await {
        Ok(client) => client,
        Err(e) => error!("Cannot connect to Spotify: {}", e),
    }
}

/// Device commands go to. Remembers the device for the next run.
async fn target_device<P>(remote: &P, settings: &mut SettingsManager) -> Option<Device>
where
    P: PlaybackRemote + ?Sized,
{
    let devices = match remote.list_devices().await {
        Ok(devices) => devices,
        Err(e) => error!("Cannot list playback devices: {}", e),
    };

    let device = crate::player::choose_device(&devices, settings.device()).cloned();
    if let Some(id) = device.as_ref().and_then(|d| d.id.clone()) {
        if settings.device() != Some(id.as_str()) {
            settings.set_device(Some(id));
            if let Err(e) = settings.persist().await {
                warning!("Failed to remember playback device: {}", e);
            }
        }
    }
    device
}

fn report_unknown_device() {
    warning!("Device ID unknown. Try restarting Spotify and then this application.");
}
