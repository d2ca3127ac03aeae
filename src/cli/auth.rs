use crate::{error, management::TokenManager, spotify, success, types::SharedLoginSession};

pub async fn auth(session: SharedLoginSession) {
    match spotify::auth::auth(session).await {
        Ok(token) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}
