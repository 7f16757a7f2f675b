use std::{str::FromStr, time::Duration};

use crate::types::Device;

pub const VOLUME_PAGE_STEP: u8 = 5;
pub const VOLUME_MINIMUM: u8 = 0;
pub const VOLUME_MAXIMUM: u8 = 100;

/// Wait before reading the playback state after a skip. Spotify keeps
/// reporting the previous track for a moment.
pub const UPDATE_DELAY: Duration = Duration::from_millis(500);

/// Picks the device to control.
///
/// The device Spotify reports as active wins. Otherwise the device saved
/// from a previous run is used, but only while it is still listed.
pub fn choose_device<'a>(devices: &'a [Device], saved: Option<&str>) -> Option<&'a Device> {
    devices
        .iter()
        .find(|d| d.is_active && d.id.is_some())
        .or_else(|| {
            let saved = saved?;
            devices.iter().find(|d| d.id.as_deref() == Some(saved))
        })
}

/// Finds a device by exact id or case-insensitive name.
pub fn find_device<'a>(devices: &'a [Device], query: &str) -> Option<&'a Device> {
    devices
        .iter()
        .find(|d| d.id.as_deref() == Some(query))
        .or_else(|| {
            devices
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(query.trim()))
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChange {
    Set(u8),
    Up,
    Down,
}

impl VolumeChange {
    /// New volume for the current level, clamped to `0..=100`.
    pub fn apply(self, current: u8) -> u8 {
        let level = match self {
            VolumeChange::Set(level) => level,
            VolumeChange::Up => current.saturating_add(VOLUME_PAGE_STEP),
            VolumeChange::Down => current.saturating_sub(VOLUME_PAGE_STEP),
        };
        level.clamp(VOLUME_MINIMUM, VOLUME_MAXIMUM)
    }
}

impl FromStr for VolumeChange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "+" => Ok(VolumeChange::Up),
            "down" | "-" => Ok(VolumeChange::Down),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|level| *level <= VOLUME_MAXIMUM)
                .map(VolumeChange::Set)
                .ok_or_else(|| format!("expected 0-100, up or down, got '{}'", s)),
        }
    }
}
