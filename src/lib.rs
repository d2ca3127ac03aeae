//! Genre Harvest CLI Library
//!
//! Scrapes music genre labels, validates them against the Spotify catalog and
//! collects the most popular artists of every genre into flat files. It also
//! carries the interactive Spotify login used to show a user's top artists.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The crate's error taxonomy
//! - `harvest` - Genre-to-artist collection pipeline
//! - `management` - Genre sources, output sinks, token, profile and run state files
//! - `profile` - The logged-in user's listening profile per time range
//! - `scrape` - Genre scraping from Every Noise at Once
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API clients
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use genrecli::{harvest::{Collector, Harvester}, spotify::catalog::*, types::Genre};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), genrecli::error::HarvestError> {
//!     genrecli::config::load_env().await.ok();
//!     let client = SpotifyCatalogClient::new(Credentials::from_env()?);
//!     let harvester = Harvester::new(Collector::new(&client));
//!     let genres: Vec<Genre> = ["lo-fi beats"].iter().filter_map(|g| Genre::new(g)).collect();
//!     let artists = harvester.run(&genres, 10).await;
//!     println!("{} artists", artists.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod harvest;
pub mod management;
pub mod profile;
pub mod scrape;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a status line with a blue `o` bullet.
///
/// Used for progress notes the user may want to see but need not act on:
/// what is being loaded, how many genres were found, where a resumed run
/// picks up.
///
/// # Arguments
///
/// Same as `println!`: a format string followed by its arguments.
///
/// # Example
///
/// ```
/// info!("Loading genres from {}...", path.display());
/// info!("Resuming: {} genres already done, {} left", done, left);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line with a green check mark once a command reached its goal.
///
/// # Arguments
///
/// Same as `println!`: a format string followed by its arguments.
///
/// # Example
///
/// ```
/// success!("Total artists collected: {}", summary.records);
/// success!("Genres saved to {}", output.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and ends the process with exit status 1.
///
/// # Arguments
///
/// Same as `println!`: a format string followed by its arguments.
///
/// # Behavior
///
/// The expansion never returns, so it type-checks as any value and can close
/// a `match` arm. Only command handlers in [`cli`] use it, for failures that
/// leave nothing sensible to do: a missing input file, missing credentials,
/// an output that cannot be written. Library code returns
/// [`error::HarvestError`] instead.
///
/// # Example
///
/// ```
/// let genres = match source.load().await {
///     Ok(g) => g,
///     Err(e) => error!("{}\nRun genrecli genres validate first.", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for a problem the current pass survives.
///
/// # Arguments
///
/// Same as `println!`: a format string followed by its arguments.
///
/// # Behavior
///
/// Execution continues. The pipeline reports failed search pages, empty
/// genres, malformed input rows and failed validation checks this way, always
/// naming the genre (and the offset for page failures).
///
/// # Example
///
/// ```
/// warning!("No artists found for genre '{}'", genre);
/// warning!("Skipping malformed line {} of {}: {}", line, path.display(), e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
