mod artists;
mod auth;
mod checkpoint;
mod genres;
mod profile;
mod state;

pub use artists::{ARTIST_COLUMNS, ArtistCsvSink};
pub use auth::TokenManager;
pub use checkpoint::{Checkpoint, CheckpointSink, RunMode};
pub use genres::{
    CsvGenreSource, GenreSource, JsonGenreSource, save_genre_catalog, save_validated_genres,
};
pub use profile::save_profile;
pub use state::{HarvestState, StateError};
