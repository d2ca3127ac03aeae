//! # API Module
//!
//! HTTP endpoints of the local server that exists only while `genrecli auth`
//! runs:
//!
//! - [`callback`] - receives Spotify's redirect, exchanges the authorization
//!   code plus the PKCE verifier of the current login session for a token and
//!   stores it back into that session.
//! - [`health`] - status and version, handy to check the server is up.
//!
//! The login session reaches the handler as an axum `Extension`, so the
//! handler only ever sees the session of the flow that started the server.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
