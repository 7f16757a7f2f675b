use std::sync::Arc;

use concertista::{
    server::{AuthOutcome, CallbackState, start_api_server},
    types::Token,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::oneshot};

fn token(access: &str) -> Token {
    Token {
        access_token: access.to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: 0,
    }
}

fn state() -> (Arc<CallbackState>, oneshot::Receiver<AuthOutcome>) {
    let (tx, rx) = oneshot::channel();
    let state = CallbackState::new(
        "verifier".to_string(),
        "client".to_string(),
        "http://127.0.0.1/callback".to_string(),
        tx,
    );
    (Arc::new(state), rx)
}

// Serves the callback router on an ephemeral port and returns its base URL.
async fn serve(state: Arc<CallbackState>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(start_api_server(listener, state));
    format!("http://{addr}")
}

#[tokio::test]
async fn test_token_is_delivered_once() {
    let (state, rx) = state();

    assert!(state.is_pending().await);
    assert!(state.deliver(Ok(token("first"))).await);
    assert!(!state.is_pending().await);
    assert!(!state.deliver(Ok(token("second"))).await);

    assert_eq!(rx.await.unwrap().unwrap().access_token, "first");
}

#[tokio::test]
async fn test_deliver_fails_when_nobody_waits() {
    let (state, rx) = state();
    drop(rx);

    assert!(!state.deliver(Ok(token("late"))).await);
}

#[tokio::test]
async fn test_health() {
    let (state, _rx) = state();
    let base = serve(state).await;

    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["service"], "concertista");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_callback_reports_denial() {
    let (state, rx) = state();
    let base = serve(state.clone()).await;

    let page = reqwest::get(format!("{base}/callback?error=access_denied"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Authorization denied"));

    // The waiting flow learns about the denial right away
    assert!(!state.is_pending().await);
    let outcome = tokio::time::timeout(std::time::Duration::from_secs(1), rx)
        .await
        .unwrap()
        .unwrap();
    assert!(outcome.unwrap_err().contains("access_denied"));
}

#[tokio::test]
async fn test_callback_without_code() {
    let (state, _rx) = state();
    let base = serve(state).await;

    let page = reqwest::get(format!("{base}/callback"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Missing authorization code"));
}

#[tokio::test]
async fn test_second_callback_is_ignored() {
    let (state, _rx) = state();
    state.deliver(Ok(token("done"))).await;
    let base = serve(state).await;

    let page = reqwest::get(format!("{base}/callback?code=abc"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Already authorized"));
}
