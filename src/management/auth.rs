use std::path::PathBuf;

use chrono::Utc;

use crate::{config, spotify, types::Token, warning};

/// Seconds before expiry at which the token is refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Access token, refreshed first when it is about to expire.
    ///
    /// A failed refresh keeps the old token; the next request then fails
    /// with an authorization error that tells the user to re-run `auth`.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired_at(Utc::now().timestamp() as u64) {
            match self.refresh().await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh Spotify token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN_SECS)
    }

    async fn refresh(&self) -> Result<Token, String> {
        let client_id = config::spotify_client_id()?;
        spotify::auth::refresh_token(&client_id, &self.token.refresh_token).await
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}
