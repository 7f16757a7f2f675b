use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::{net::TcpListener, sync::oneshot};

use crate::{
    Res, config, info,
    management::TokenManager,
    server::{CallbackState, start_api_server},
    spotify::SpotifyClient,
    types::{Token, TokenResponse},
    utils, warning,
};

/// How long the authorization flow waits for the browser redirect.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 PKCE authorization flow and returns a fresh token.
///
/// The flow binds the local callback listener before the browser is opened,
/// so a fast redirect cannot race the server start:
///
/// 1. Generate the code verifier and its SHA256 challenge
/// 2. Bind the callback listener on `SERVER_ADDRESS` and spawn it
/// 3. Open the Spotify authorization page in the default browser
/// 4. Wait for the listener to hand over the exchanged token
///
/// The listener keeps running until the process exits. The outcome of the
/// redirect, a token or the reason it failed, reaches this function through
/// a one-shot channel; a second redirect is answered by the listener but
/// ignored.
///
/// # Errors
///
/// Fails when the client id is not configured or the listener address
/// cannot be bound, as soon as the user denies access or the code exchange
/// fails, and when nothing arrives within 60 seconds.
pub async fn authorize() -> Res<Token> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Cannot listen on {}: {}", addr, e))?;

    let (sender, receiver) = oneshot::channel();
    let state = Arc::new(CallbackState::new(
        code_verifier,
        client_id.clone(),
        redirect_uri.clone(),
        sender,
    ));
    tokio::spawn(start_api_server(listener, state));

    let auth_url = authorize_url(
        &config::spotify_apiauth_url(),
        &client_id,
        &redirect_uri,
        &code_challenge,
        &config::spotify_scope(),
    )?;

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for Spotify authorization in your browser...");
    }

    match tokio::time::timeout(CALLBACK_TIMEOUT, receiver).await {
        Ok(Ok(Ok(token))) => Ok(token),
        Ok(Ok(Err(e))) => Err(e.into()),
        Ok(Err(_)) => Err("Callback listener stopped before authorization finished.".into()),
        Err(_) => Err("Authentication timed out.".into()),
    }
}

/// Returns a client backed by the cached token, authorizing first when no
/// token is cached yet.
pub async fn connect() -> Res<SpotifyClient> {
    let manager = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(_) => {
            info!("No cached Spotify token found, starting authorization.");
            let manager = TokenManager::new(authorize().await?);
            manager.persist().await?;
            manager
        }
    };

    Ok(SpotifyClient::new(manager))
}

/// Builds the authorization page URL with the PKCE challenge attached.
pub fn authorize_url(
    base: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> Result<String, String> {
    let url = Url::parse_with_params(
        base,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope),
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(url.into())
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify may rotate the refresh token; when the response carries none the
/// old one is kept.
pub async fn refresh_token(client_id: &str, refresh_token: &str) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(Token::from_response(
        json,
        Some(refresh_token),
        Utc::now().timestamp() as u64,
    ))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// The verifier must be the one whose challenge was sent with the
/// authorization request. Codes are single-use and expire quickly, so the
/// callback handler calls this immediately.
pub async fn exchange_code_pkce(
    client_id: &str,
    redirect_uri: &str,
    code: &str,
    verifier: &str,
) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(Token::from_response(
        json,
        None,
        Utc::now().timestamp() as u64,
    ))
}
