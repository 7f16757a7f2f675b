use concertista::{
    management::TokenManager,
    player::{UPDATE_DELAY, VolumeChange, choose_device, find_device},
    spotify::{auth::authorize_url, client::error_message},
    types::{
        CurrentPlaybackResponse, Device, Image, PlaybackState, Token, TokenResponse, pick_album_art,
    },
};

fn device(id: &str, name: &str, active: bool) -> Device {
    Device {
        id: Some(id.to_string()),
        is_active: active,
        name: name.to_string(),
        kind: "Computer".to_string(),
        volume_percent: Some(50),
    }
}

#[test]
fn test_active_device_wins() {
    let devices = vec![device("a", "Laptop", false), device("b", "Kitchen", true)];

    let chosen = choose_device(&devices, Some("a")).unwrap();
    assert_eq!(chosen.id.as_deref(), Some("b"));
}

#[test]
fn test_saved_device_used_when_none_active() {
    let devices = vec![device("a", "Laptop", false), device("b", "Kitchen", false)];

    assert_eq!(
        choose_device(&devices, Some("b")).and_then(|d| d.id.as_deref()),
        Some("b")
    );
    // A saved id that is no longer listed is not used
    assert!(choose_device(&devices, Some("gone")).is_none());
    assert!(choose_device(&devices, None).is_none());
}

#[test]
fn test_active_device_without_id_is_skipped() {
    let mut restricted = device("x", "Speaker", true);
    restricted.id = None;
    let devices = vec![restricted, device("a", "Laptop", false)];

    assert_eq!(
        choose_device(&devices, Some("a")).and_then(|d| d.id.as_deref()),
        Some("a")
    );
}

#[test]
fn test_find_device_by_id_or_name() {
    let devices = vec![device("a", "Laptop", false), device("b", "Kitchen", true)];

    assert_eq!(find_device(&devices, "a").map(|d| d.name.as_str()), Some("Laptop"));
    assert_eq!(find_device(&devices, "kitchen").map(|d| d.name.as_str()), Some("Kitchen"));
    assert!(find_device(&devices, "garage").is_none());
}

#[test]
fn test_state_refresh_waits_half_a_second() {
    assert_eq!(UPDATE_DELAY, std::time::Duration::from_millis(500));
}

#[test]
fn test_volume_steps_and_clamps() {
    assert_eq!(VolumeChange::Up.apply(50), 55);
    assert_eq!(VolumeChange::Down.apply(50), 45);
    assert_eq!(VolumeChange::Up.apply(98), 100);
    assert_eq!(VolumeChange::Down.apply(3), 0);
    assert_eq!(VolumeChange::Set(30).apply(80), 30);
}

#[test]
fn test_volume_parse() {
    assert_eq!("up".parse::<VolumeChange>(), Ok(VolumeChange::Up));
    assert_eq!("+".parse::<VolumeChange>(), Ok(VolumeChange::Up));
    assert_eq!("Down".parse::<VolumeChange>(), Ok(VolumeChange::Down));
    assert_eq!("-".parse::<VolumeChange>(), Ok(VolumeChange::Down));
    assert_eq!("70".parse::<VolumeChange>(), Ok(VolumeChange::Set(70)));
    assert!("101".parse::<VolumeChange>().is_err());
    assert!("loud".parse::<VolumeChange>().is_err());
}

fn image(url: &str, height: Option<u32>) -> Image {
    Image {
        url: url.to_string(),
        height,
        width: height,
    }
}

#[test]
fn test_album_art_picks_last_image_in_range() {
    let images = vec![
        image("big", Some(640)),
        image("medium", Some(300)),
        image("small", Some(64)),
    ];
    assert_eq!(pick_album_art(&images, 128).as_deref(), Some("medium"));

    let images = vec![image("a", Some(300)), image("b", Some(128)), image("c", None)];
    assert_eq!(pick_album_art(&images, 128).as_deref(), Some("b"));

    let images = vec![image("huge", Some(1000)), image("tiny", Some(32))];
    assert!(pick_album_art(&images, 128).is_none());
}

#[test]
fn test_playback_state_from_response() {
    let json = r#"{
        "is_playing": true,
        "device": {
            "id": "dev-1", "is_active": true, "name": "Laptop",
            "type": "Computer", "volume_percent": 35
        },
        "item": {
            "name": "Gymnopédie No. 1",
            "artists": [{ "name": "Erik Satie" }, { "name": "Pascal Rogé" }],
            "album": { "images": [
                { "url": "https://i.scdn.co/640", "height": 640, "width": 640 },
                { "url": "https://i.scdn.co/300", "height": 300, "width": 300 },
                { "url": "https://i.scdn.co/64", "height": 64, "width": 64 }
            ] }
        }
    }"#;
    let response: CurrentPlaybackResponse = serde_json::from_str(json).unwrap();
    let state = PlaybackState::from(response);

    assert!(state.is_playing);
    assert_eq!(state.title.as_deref(), Some("Gymnopédie No. 1"));
    assert_eq!(state.artists, ["Erik Satie", "Pascal Rogé"]);
    assert_eq!(state.album_art.as_deref(), Some("https://i.scdn.co/300"));
    assert_eq!(state.device_id.as_deref(), Some("dev-1"));
    assert_eq!(state.volume, Some(35));
}

#[test]
fn test_playback_state_without_item() {
    let json = r#"{ "is_playing": false, "item": null, "device": null }"#;
    let response: CurrentPlaybackResponse = serde_json::from_str(json).unwrap();

    assert_eq!(PlaybackState::from(response), PlaybackState::default());
}

fn token_response(refresh: Option<&str>) -> TokenResponse {
    TokenResponse {
        access_token: "access".to_string(),
        refresh_token: refresh.map(str::to_string),
        scope: "user-read-playback-state".to_string(),
        expires_in: 3600,
    }
}

#[test]
fn test_token_keeps_previous_refresh_token() {
    let token = Token::from_response(token_response(None), Some("old"), 1_000);
    assert_eq!(token.refresh_token, "old");
    assert_eq!(token.obtained_at, 1_000);

    let token = Token::from_response(token_response(Some("new")), Some("old"), 1_000);
    assert_eq!(token.refresh_token, "new");
}

#[test]
fn test_token_expires_early() {
    let manager = TokenManager::new(Token::from_response(token_response(None), None, 1_000));

    assert!(!manager.is_expired_at(1_000));
    assert!(!manager.is_expired_at(4_359));
    // refreshed four minutes before the hour is up
    assert!(manager.is_expired_at(4_360));
    assert!(manager.is_expired_at(10_000));
}

#[test]
fn test_authorize_url_carries_pkce_parameters() {
    let url = authorize_url(
        "https://accounts.spotify.com/authorize",
        "client-1",
        "http://127.0.0.1:9182/callback",
        "challenge",
        "user-read-playback-state user-modify-playback-state",
    )
    .unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=client-1"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("code_challenge=challenge"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A9182%2Fcallback"));
    assert!(url.contains("scope=user-read-playback-state+user-modify-playback-state"));
}

#[test]
fn test_error_message_from_body() {
    let body = r#"{ "error": { "status": 404, "message": "Player command failed: No active device found" } }"#;

    assert_eq!(
        error_message(body).as_deref(),
        Some("Player command failed: No active device found")
    );
    assert_eq!(error_message("<html>bad gateway</html>"), None);
}
