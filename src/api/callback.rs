use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{server::CallbackState, spotify::auth::exchange_code_pkce, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<Arc<CallbackState>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Spotify authorization was denied: {}", reason);
        state
            .deliver(Err(format!("Authorization denied: {}", reason)))
            .await;
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    if !state.is_pending().await {
        return Html("<h4>Already authorized.</h4><p>You can close this window.</p>");
    }

    match exchange_code_pkce(
        &state.client_id,
        &state.redirect_uri,
        code,
        &state.code_verifier,
    )
    .await
    {
        Ok(token) => {
            if state.deliver(Ok(token)).await {
                Html("<h2>Concertista</h2><p>Access to your account was granted. You can close this window.</p>")
            } else {
                Html("<h4>Already authorized.</h4><p>You can close this window.</p>")
            }
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            state.deliver(Err(format!("Token exchange failed: {}", e))).await;
            Html("<h4>Login failed.</h4>")
        }
    }
}
