use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header::CONTENT_LENGTH};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config,
    management::TokenManager,
    spotify::{PlaybackRemote, RemoteError},
    types::{
        CurrentPlaybackResponse, Device, DevicesResponse, PlaybackState, Profile,
        StartPlaybackRequest, TrackRef, TransferPlaybackRequest,
    },
};

/// Authenticated Web API client.
///
/// Holds the token manager behind an async mutex so a near-expiry token can
/// be refreshed from `&self` calls.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    market: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            market: config::market(),
            tokens: Mutex::new(tokens),
        }
    }

    pub fn market(&self) -> &str {
        &self.market
    }

    pub async fn me(&self) -> Result<Profile, RemoteError> {
        self.get_json("/me", &[]).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteError> {
        let req = self.request(Method::GET, path).await.query(query);
        let res = execute(req).await?;
        Ok(res.json::<T>().await?)
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let token = self.tokens.lock().await.get_valid_token().await;
        self.http
            .request(method, format!("{}{}", self.api_url, path))
            .bearer_auth(token)
    }

    // Player commands carry no body but Spotify insists on a length header.
    async fn command(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(), RemoteError> {
        let req = self
            .request(method, path)
            .await
            .query(query)
            .header(CONTENT_LENGTH, "0");
        execute(req).await.map(|_| ())
    }
}

async fn execute(req: RequestBuilder) -> Result<Response, RemoteError> {
    let res = req.send().await?;
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    let message = error_message(&body).unwrap_or_else(|| status.to_string());
    if status == StatusCode::UNAUTHORIZED {
        return Err(RemoteError::NotAuthorized(message));
    }
    Err(RemoteError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Extracts `error.message` from a Web API error body.
pub fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json["error"]["message"].as_str().map(str::to_string)
}

#[async_trait]
impl PlaybackRemote for SpotifyClient {
    async fn current_state(&self) -> Result<Option<PlaybackState>, RemoteError> {
        let req = self
            .request(Method::GET, "/me/player")
            .await
            .query(&[("market", self.market.as_str())]);
        let res = execute(req).await?;
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let playback = res.json::<CurrentPlaybackResponse>().await?;
        Ok(Some(PlaybackState::from(playback)))
    }

    async fn start(&self, device_id: &str, uris: &[TrackRef]) -> Result<(), RemoteError> {
        let body = StartPlaybackRequest {
            uris: uris.to_vec(),
        };
        let req = self
            .request(Method::PUT, "/me/player/play")
            .await
            .query(&[("device_id", device_id)])
            .json(&body);
        execute(req).await.map(|_| ())
    }

    async fn resume(&self, device_id: &str) -> Result<(), RemoteError> {
        self.command(Method::PUT, "/me/player/play", &[("device_id", device_id)])
            .await
    }

    async fn pause(&self, device_id: &str) -> Result<(), RemoteError> {
        self.command(Method::PUT, "/me/player/pause", &[("device_id", device_id)])
            .await
    }

    async fn next(&self, device_id: &str) -> Result<(), RemoteError> {
        self.command(Method::POST, "/me/player/next", &[("device_id", device_id)])
            .await
    }

    async fn previous(&self, device_id: &str) -> Result<(), RemoteError> {
        self.command(
            Method::POST,
            "/me/player/previous",
            &[("device_id", device_id)],
        )
        .await
    }

    async fn set_volume(&self, level: u8, device_id: &str) -> Result<(), RemoteError> {
        let level = level.to_string();
        self.command(
            Method::PUT,
            "/me/player/volume",
            &[("volume_percent", level.as_str()), ("device_id", device_id)],
        )
        .await
    }

    async fn transfer(&self, device_id: &str) -> Result<(), RemoteError> {
        let body = TransferPlaybackRequest {
            device_ids: vec![device_id.to_string()],
        };
        let req = self.request(Method::PUT, "/me/player").await.json(&body);
        execute(req).await.map(|_| ())
    }

    async fn list_devices(&self) -> Result<Vec<Device>, RemoteError> {
        let res: DevicesResponse = self.get_json("/me/player/devices", &[]).await?;
        Ok(res.devices)
    }
}
