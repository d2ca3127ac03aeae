use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    error::HarvestError,
    types::{Genre, GenreCatalog},
    utils, warning,
};

/// Supplies the ordered list of genres a pass works on.
#[async_trait]
pub trait GenreSource {
    /// # Errors
    ///
    /// [`HarvestError::SourceUnavailable`] when the backing file is missing,
    /// empty or not in the expected shape. Single bad rows are skipped with a
    /// warning.
    async fn load(&self) -> Result<Vec<Genre>, HarvestError>;
}

/// Tabular genre list with a `genre` header column.
pub struct CsvGenreSource {
    path: PathBuf,
}

impl CsvGenreSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GenreSource for CsvGenreSource {
    async fn load(&self) -> Result<Vec<Genre>, HarvestError> {
        let content = async_fs::read(&self.path)
            .await
            .map_err(|e| HarvestError::source_unavailable(&self.path, e))?;
        if content.is_empty() {
            return Err(HarvestError::source_unavailable(&self.path, "file is empty"));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_slice());

        let headers = reader
            .headers()
            .map_err(|e| HarvestError::source_unavailable(&self.path, e))?
            .clone();
        let Some(column) = headers.iter().position(|h| h == "genre") else {
            return Err(HarvestError::source_unavailable(
                &self.path,
                "missing 'genre' column",
            ));
        };

        let mut genres = Vec::new();
        for (i, row) in reader.records().enumerate() {
            // header is line 1
            let line = i + 2;
            match row {
                Ok(record) => match record.get(column).and_then(Genre::new) {
                    Some(genre) => genres.push(genre),
                    None => warning!(
                        "Skipping line {} of {}: empty genre",
                        line,
                        self.path.display()
                    ),
                },
                Err(e) => warning!(
                    "Skipping malformed line {} of {}: {}",
                    line,
                    self.path.display(),
                    e
                ),
            }
        }

        Ok(genres)
    }
}

/// Scraped genre catalog (`{"total_genres": .., "genres": [..]}`); only
/// `genres` is used.
pub struct JsonGenreSource {
    path: PathBuf,
}

impl JsonGenreSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl GenreSource for JsonGenreSource {
    async fn load(&self) -> Result<Vec<Genre>, HarvestError> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| HarvestError::source_unavailable(&self.path, e))?;
        let catalog: GenreCatalog = serde_json::from_str(&content)
            .map_err(|e| HarvestError::source_unavailable(&self.path, e))?;

        if catalog.total_genres != catalog.genres.len() {
            warning!(
                "{} announces {} genres but lists {}",
                self.path.display(),
                catalog.total_genres,
                catalog.genres.len()
            );
        }

        let blanks = catalog
            .genres
            .iter()
            .filter(|g| g.trim().is_empty())
            .count();
        if blanks > 0 {
            warning!(
                "Ignoring {} empty genre labels in {}",
                blanks,
                self.path.display()
            );
        }

        Ok(utils::distinct_genres(&catalog.genres))
    }
}

/// Writes the scraped catalog as pretty JSON, creating parent directories.
pub async fn save_genre_catalog(path: &Path, catalog: &GenreCatalog) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| HarvestError::sink(path, e))?;
    }

    let json = serde_json::to_string_pretty(catalog).map_err(|e| HarvestError::sink(path, e))?;
    async_fs::write(path, json)
        .await
        .map_err(|e| HarvestError::sink(path, e))
}

/// Writes validated genres under a `genre` header, sorted alphabetically and
/// without duplicates. Existing files are overwritten in place.
pub async fn save_validated_genres(path: &Path, genres: &[Genre]) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| HarvestError::sink(path, e))?;
    }

    let sorted: BTreeSet<&Genre> = genres.iter().collect();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["genre"])
        .map_err(|e| HarvestError::sink(path, e))?;
    for genre in sorted {
        writer
            .write_record([genre.as_str()])
            .map_err(|e| HarvestError::sink(path, e))?;
    }
    let content = writer
        .into_inner()
        .map_err(|e| HarvestError::sink(path, e))?;

    async_fs::write(path, content)
        .await
        .map_err(|e| HarvestError::sink(path, e))
}
