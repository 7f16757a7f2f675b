use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

/// URI prefix the Web API expects when queuing tracks by reference.
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

// Catalog files write ids as any YAML scalar: bare numbers, floats, or
// strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Str(s) => s,
        }
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ComposerId(String);

impl ComposerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ComposerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_scalar(deserializer).map(Self)
    }
}

impl From<ComposerId> for String {
    fn from(value: ComposerId) -> Self {
        value.0
    }
}

impl fmt::Display for ComposerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw track id as stored in a piece file; only meaningful to Spotify.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TrackId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_scalar(deserializer).map(Self)
    }
}

impl From<TrackId> for String {
    fn from(value: TrackId) -> Self {
        value.0
    }
}

/// A track id rendered as a playback reference (`spotify:track:<id>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TrackRef(String);

impl TrackRef {
    pub fn uri(&self) -> &str {
        &self.0
    }
}

impl From<&TrackId> for TrackRef {
    fn from(track: &TrackId) -> Self {
        Self(format!("{TRACK_URI_PREFIX}{}", track.as_str()))
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composer {
    pub id: ComposerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(deserialize_with = "deserialize_scalar")]
    pub id: String,
    pub name: String,
    pub composer_id: ComposerId,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub album_id: Option<String>,
    pub tracks: Vec<TrackId>,
}

fn deserialize_optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|v| v.map(Scalar::into_string))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Body of a successful token endpoint response.
///
/// A refresh grant may omit `refresh_token`, in which case the previous one
/// stays valid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}

impl Token {
    pub fn from_response(res: TokenResponse, previous_refresh: Option<&str>, now: u64) -> Self {
        Token {
            access_token: res.access_token,
            refresh_token: res
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            scope: res.scope,
            expires_in: res.expires_in,
            obtained_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicLibrary {
    #[default]
    Entire,
    Selection,
}

impl fmt::Display for MusicLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusicLibrary::Entire => f.write_str("entire"),
            MusicLibrary::Selection => f.write_str("selection"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub library: MusicLibrary,
    #[serde(default)]
    pub selection: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub is_active: bool,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentPlaybackResponse {
    pub is_playing: bool,
    pub item: Option<PlayingItem>,
    pub device: Option<Device>,
}

/// Best-effort snapshot of what the remote player is doing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub title: Option<String>,
    pub artists: Vec<String>,
    pub album_art: Option<String>,
    pub device_id: Option<String>,
    pub volume: Option<u8>,
}

pub const ALBUM_ART_MIN_HEIGHT: u32 = 128;
pub const ALBUM_ART_MAX_HEIGHT: u32 = 600;

/// Picks the last image whose height is within `min_height..=600`.
pub fn pick_album_art(images: &[Image], min_height: u32) -> Option<String> {
    images
        .iter()
        .filter(|img| {
            img.height
                .is_some_and(|h| h >= min_height && h <= ALBUM_ART_MAX_HEIGHT)
        })
        .last()
        .map(|img| img.url.clone())
}

impl From<CurrentPlaybackResponse> for PlaybackState {
    fn from(resp: CurrentPlaybackResponse) -> Self {
        let (title, artists, album_art) = match resp.item {
            Some(item) => {
                let art = item
                    .album
                    .as_ref()
                    .and_then(|a| pick_album_art(&a.images, ALBUM_ART_MIN_HEIGHT));
                (
                    Some(item.name),
                    item.artists.into_iter().map(|a| a.name).collect(),
                    art,
                )
            }
            None => (None, Vec::new(), None),
        };

        PlaybackState {
            is_playing: resp.is_playing,
            title,
            artists,
            album_art,
            device_id: resp.device.as_ref().and_then(|d| d.id.clone()),
            volume: resp.device.and_then(|d| d.volume_percent),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub release_date: String,
    pub album_type: String,
    pub total_tracks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumTrack {
    pub id: String,
    pub name: String,
    pub track_number: u32,
    #[serde(default = "default_disc")]
    pub disc_number: u32,
}

fn default_disc() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<TrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPlaybackRequest {
    pub device_ids: Vec<String>,
}

#[derive(Tabled)]
pub struct ComposerTableRow {
    pub id: String,
    pub name: String,
    pub pieces: usize,
}

#[derive(Tabled)]
pub struct PieceTableRow {
    pub id: String,
    pub name: String,
    pub composer: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub active: String,
    pub name: String,
    pub kind: String,
    pub volume: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: String,
    pub name: String,
    pub released: String,
    pub tracks: u32,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub number: String,
    pub name: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub kind: String,
    pub label: String,
    pub id: String,
}
