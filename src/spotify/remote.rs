use async_trait::async_trait;

use crate::{
    spotify::RemoteError,
    types::{Device, PlaybackState, TrackRef},
};

/// Remote control of an account-linked Spotify player.
///
/// Every call is a single request; nothing is retried or queued.
#[async_trait]
pub trait PlaybackRemote {
    /// `None` when nothing is loaded on any device.
    async fn current_state(&self) -> Result<Option<PlaybackState>, RemoteError>;

    /// Replaces the queue with `uris` and starts playing on `device_id`.
    async fn start(&self, device_id: &str, uris: &[TrackRef]) -> Result<(), RemoteError>;

    /// Continues whatever was paused.
    async fn resume(&self, device_id: &str) -> Result<(), RemoteError>;

    async fn pause(&self, device_id: &str) -> Result<(), RemoteError>;

    async fn next(&self, device_id: &str) -> Result<(), RemoteError>;

    async fn previous(&self, device_id: &str) -> Result<(), RemoteError>;

    async fn set_volume(&self, level: u8, device_id: &str) -> Result<(), RemoteError>;

    async fn transfer(&self, device_id: &str) -> Result<(), RemoteError>;

    async fn list_devices(&self) -> Result<Vec<Device>, RemoteError>;
}
