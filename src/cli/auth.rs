use crate::{
    error,
    management::TokenManager,
    spotify::{self, SpotifyClient},
    success, warning,
};

/// Authorizes with Spotify and caches the token, replacing any cached one.
pub async fn auth() {
    let token = match spotify::auth::authorize().await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    };

    let manager = TokenManager::new(token);
    if let Err(e) = manager.persist().await {
        error!("Failed to save token to cache: {}", e);
    }

    match SpotifyClient::new(manager).me().await {
        Ok(me) => success!(
            "{}, access to your account was granted.",
            me.display_name.unwrap_or(me.id)
        ),
        Err(e) => {
            warning!("Could not read your profile: {}", e);
            success!("Authentication successful!");
        }
    }
}
