//! Configuration management for the genre harvesting CLI.
//!
//! Values are read from environment variables, optionally seeded from `.env`
//! files. The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`genrecli/.env`)
//! 3. `.env` in the current working directory
//! 4. Application defaults (endpoints, scope, server address)
//!
//! Client credentials have no default; asking for them when they are unset
//! yields [`HarvestError::MissingConfig`].

use std::{env, path::PathBuf};

use crate::error::HarvestError;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_EVERYNOISE_URL: &str = "https://everynoise.com/everynoise1d.html";
pub const DEFAULT_SCOPE: &str =
    "user-library-read user-top-read user-read-recently-played playlist-read-private";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

pub const DEFAULT_GENRE_CATALOG_PATH: &str = "data/genres/all_spotify_genres.json";
pub const DEFAULT_VALIDATED_GENRES_PATH: &str = "data/genres/spotify_genres.csv";
pub const DEFAULT_ARTISTS_PATH: &str = "data/artists_by_genre.csv";
pub const DEFAULT_PROFILE_PATH: &str = "data/data_spotify.json";

/// Loads `.env` files from the local data directory and the working directory.
///
/// Creates `genrecli/` inside the platform data directory if needed. Both
/// files are optional; variables already present in the environment are
/// never overwritten.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }
    dotenv::dotenv().ok();

    Ok(())
}

/// Root of everything the CLI keeps outside the working directory.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("genrecli");
    path
}

pub fn server_addr() -> String {
    env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

pub fn spotify_client_id() -> Result<String, HarvestError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret used for the catalog-level client-credentials grant.
///
/// Never log this value.
pub fn spotify_client_secret() -> Result<String, HarvestError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

pub fn spotify_redirect_uri() -> Result<String, HarvestError> {
    required("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_scope() -> String {
    env_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    env_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    env_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    env_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

pub fn everynoise_url() -> String {
    env_or("EVERYNOISE_URL", DEFAULT_EVERYNOISE_URL)
}

fn required(key: &'static str) -> Result<String, HarvestError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(HarvestError::MissingConfig(key)),
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
