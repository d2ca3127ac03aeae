use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{spotify::auth::exchange_code_pkce, types::SharedLoginSession, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(session): Extension<SharedLoginSession>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return Html("<h4>Login was denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = session.lock().await;
    let Some(login) = state.as_mut() else {
        return Html("<h4>Missing PKCE code verifier.</h4>");
    };

    let verifier = login.code_verifier.clone();

    match exchange_code_pkce(code, &verifier).await {
        Ok(token) => {
            login.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
