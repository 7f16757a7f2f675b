use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::{
    net::TcpListener,
    sync::{Mutex, oneshot},
};

use crate::{api, types::Token, warning};

/// Outcome of one authorization attempt as seen by the callback handler.
pub type AuthOutcome = Result<Token, String>;

/// State shared with the `/callback` handler for one authorization flow.
///
/// The sender is taken by the first finished attempt, so the outcome is
/// handed over exactly once, whether it is a token or a failure.
pub struct CallbackState {
    pub code_verifier: String,
    pub client_id: String,
    pub redirect_uri: String,
    sender: Mutex<Option<oneshot::Sender<AuthOutcome>>>,
}

impl CallbackState {
    pub fn new(
        code_verifier: String,
        client_id: String,
        redirect_uri: String,
        sender: oneshot::Sender<AuthOutcome>,
    ) -> Self {
        Self {
            code_verifier,
            client_id,
            redirect_uri,
            sender: Mutex::new(Some(sender)),
        }
    }

    pub async fn is_pending(&self) -> bool {
        self.sender.lock().await.is_some()
    }

    /// Hands the outcome to the waiting flow. Returns `false` if one was
    /// already delivered or nobody is waiting anymore.
    pub async fn deliver(&self, outcome: AuthOutcome) -> bool {
        match self.sender.lock().await.take() {
            Some(sender) => sender.send(outcome).is_ok(),
            None => false,
        }
    }
}

pub fn router(state: Arc<CallbackState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Serves the callback listener until the process exits.
pub async fn start_api_server(listener: TcpListener, state: Arc<CallbackState>) {
    if let Err(e) = axum::serve(listener, router(state)).await {
        warning!("Callback listener stopped: {}", e);
    }
}
