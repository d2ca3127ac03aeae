use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use genrecli::{
    cli, config, error,
    harvest::{DEFAULT_POOL_SIZE, MAX_PAGE_SIZE},
    types::{SharedLoginSession, TimeRange},
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in with your Spotify account
    Auth,

    /// Show your top artists (requires `auth`)
    TopArtists(TopArtistsOptions),

    /// Export your listening profile for all time ranges (requires `auth`)
    Profile(ProfileOptions),

    /// Scrape and validate genre labels
    Genres(GenresOptions),

    /// Collect the most popular artists of every validated genre
    Artists(ArtistsOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct TopArtistsOptions {
    /// Number of artists to show (1-50)
    #[clap(long, default_value_t = 20)]
    pub limit: u32,

    /// Listening window the ranking is based on
    #[clap(long, value_enum, default_value = "medium")]
    pub time_range: TimeRange,
}

#[derive(Parser, Debug, Clone)]
pub struct ProfileOptions {
    /// JSON file to write
    #[clap(long, default_value = config::DEFAULT_PROFILE_PATH)]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct GenresOptions {
    #[command(subcommand)]
    pub command: GenresSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum GenresSubcommand {
    /// Scrape all genre labels from Every Noise at Once
    Scrape(GenresScrapeOpts),

    /// Keep the scraped genres Spotify has tracks for
    Validate(GenresValidateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct GenresScrapeOpts {
    /// JSON catalog to write
    #[clap(long, default_value = config::DEFAULT_GENRE_CATALOG_PATH)]
    pub output: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct GenresValidateOpts {
    /// JSON catalog produced by `genres scrape`
    #[clap(long, default_value = config::DEFAULT_GENRE_CATALOG_PATH)]
    pub input: PathBuf,

    /// CSV file receiving the valid genres
    #[clap(long, default_value = config::DEFAULT_VALIDATED_GENRES_PATH)]
    pub output: PathBuf,

    /// Pause between two requests, in milliseconds
    #[clap(long, default_value_t = 100)]
    pub throttle_ms: u64,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistsOptions {
    /// CSV file with a `genre` column
    #[clap(long, default_value = config::DEFAULT_VALIDATED_GENRES_PATH)]
    pub input: PathBuf,

    /// CSV file receiving the artists
    #[clap(long, default_value = config::DEFAULT_ARTISTS_PATH)]
    pub output: PathBuf,

    /// Artists kept per genre
    #[clap(long, default_value_t = 100)]
    pub limit: usize,

    /// Candidates collected per genre before ranking
    #[clap(long, default_value_t = DEFAULT_POOL_SIZE)]
    pub pool_size: usize,

    /// Results per search request (1-50)
    #[clap(long, default_value_t = MAX_PAGE_SIZE)]
    pub page_size: u32,

    /// Pause between two requests, in milliseconds
    #[clap(long, default_value_t = 100)]
    pub throttle_ms: u64,

    /// Skip genres finished by an interrupted run and append to its output
    #[clap(long)]
    pub resume: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let session: SharedLoginSession = Arc::new(Mutex::new(None));
            cli::auth(session).await;
        }
        Command::TopArtists(opt) => cli::top_artists(opt.limit, opt.time_range).await,
        Command::Profile(opt) => cli::profile(&opt.output).await,
        Command::Genres(opt) => match opt.command {
            GenresSubcommand::Scrape(s) => cli::scrape_genres(&s.output).await,
            GenresSubcommand::Validate(v) => {
                cli::validate(&v.input, &v.output, Duration::from_millis(v.throttle_ms)).await
            }
        },
        Command::Artists(opt) => {
            cli::harvest_artists(cli::HarvestOptions {
                input: opt.input,
                output: opt.output,
                limit: opt.limit,
                pool_size: opt.pool_size,
                page_size: opt.page_size,
                throttle: Duration::from_millis(opt.throttle_ms),
                resume: opt.resume,
            })
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
