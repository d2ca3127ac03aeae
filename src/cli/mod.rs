//! # CLI Module
//!
//! Command handlers behind `genrecli`. Each handler loads its inputs, drives
//! the library code, renders progress and results, and decides which failures
//! end the process.
//!
//! ## Commands
//!
//! - [`auth`] - interactive Spotify login (OAuth 2.0 PKCE), token is cached
//! - [`top_artists`] - the logged-in user's top artists as a table
//! - [`profile`] - the logged-in user's listening profile per time range, as JSON
//! - [`scrape_genres`] - genre labels from Every Noise at Once into a JSON catalog
//! - [`validate`] - keeps the catalog genres Spotify has tracks for, as CSV
//! - [`harvest_artists`] - the top artists of every validated genre, as CSV
//!
//! ## Data Flow
//!
//! ```text
//! genres scrape ──> all_spotify_genres.json
//!                        │
//! genres validate ───────┴──> spotify_genres.csv
//!                                  │
//! artists ─────────────────────────┴──> artists_by_genre.csv
//! ```
//!
//! ## Failure Policy
//!
//! Missing input files, missing credentials and unwritable outputs end the
//! process through `error!`. Failed search pages, empty genres and failed
//! validation checks are reported with `warning!` and the pass continues.
//!
//! ## Usage
//!
//! ```bash
//! genrecli genres scrape
//! genrecli genres validate
//! genrecli artists --limit 50
//! genrecli artists --resume        # continue an interrupted harvest
//! genrecli auth && genrecli top-artists --time-range long
//! genrecli profile --output data/data_spotify.json
//! ```

mod artists;
mod auth;
mod genres;
mod profile;
mod top_artists;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, management::TokenManager};

pub use artists::{HarvestOptions, harvest_artists};
pub use auth::auth;
pub use genres::{scrape_genres, validate};
pub use profile::profile;
pub use top_artists::top_artists;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(TICK_CHARS),
    );
    pb
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .tick_chars(TICK_CHARS)
            .progress_chars("=> "),
    );
    pb
}

/// Cached user token, refreshed when needed. Exits when there is none.
async fn user_token() -> String {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run genrecli auth\n Error: {}",
            e
        ),
    };

    match token_mgr.get_valid_token().await {
        Ok(t) => t,
        Err(e) => error!("Cannot refresh token. Please run genrecli auth\n Error: {}", e),
    }
}
