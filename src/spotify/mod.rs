//! # Spotify Integration Module
//!
//! HTTP clients for the two kinds of Spotify access the CLI needs:
//!
//! ```text
//! CLI layer
//!     ├── catalog  (client credentials: artist search, genre checks)
//!     ├── auth     (OAuth 2.0 PKCE: interactive user login, token refresh)
//!     └── user     (user data: top items, library, playlists)
//!          ↓
//! reqwest / serde_json
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Catalog access
//!
//! [`catalog::SpotifyCatalogClient`] authenticates with the application's
//! client id and secret only; no user is involved. It keeps its app token in
//! an explicit session with an expiry and fetches a new one on demand. It
//! implements the harvest pipeline's [`crate::harvest::ArtistSearch`] and
//! [`crate::harvest::GenreCheck`] seams. Requests are never retried here;
//! the pipeline decides what a failed page means.
//!
//! ## User access
//!
//! [`auth::auth`] runs the PKCE flow against a local callback server and
//! returns the user token, which [`crate::management::TokenManager`]
//! persists and refreshes. [`user::SpotifyUserClient`] uses it to read the
//! user's top artists and tracks, recent plays, saved tracks and playlists.
//!
//! ## Error Types
//!
//! Everything returns [`crate::error::HarvestError`]: transport failures as
//! `Http`, non-2xx answers as `Api` with status and body.

pub mod auth;
pub mod catalog;
pub mod user;

use reqwest::Response;

use crate::error::HarvestError;

/// Turns a non-2xx response into [`HarvestError::Api`], keeping the body for
/// the error message.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, HarvestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HarvestError::Api { status, body })
}
