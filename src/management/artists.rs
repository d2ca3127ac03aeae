use std::{
    fs::{self, File, OpenOptions},
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    error::HarvestError,
    harvest::RecordSink,
    types::{ArtistCsvRow, ArtistRecord, Genre},
};

pub const ARTIST_COLUMNS: [&str; 7] = [
    "artist_id",
    "artist_name",
    "genre",
    "popularity",
    "followers",
    "genres",
    "spotify_url",
];

/// CSV output for harvested artists, flushed after every genre.
///
/// Writes go straight to the target file; there is no write-and-rename, so
/// an interrupted run leaves the genres flushed so far on disk.
pub struct ArtistCsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    written: usize,
}

impl ArtistCsvSink {
    /// Starts a fresh output file, replacing any previous content.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, HarvestError> {
        Self::open(path.into(), false)
    }

    /// Continues an existing output file. The header is only written when the
    /// file is new or empty.
    pub fn append(path: impl Into<PathBuf>) -> Result<Self, HarvestError> {
        Self::open(path.into(), true)
    }

    fn open(path: PathBuf, append: bool) -> Result<Self, HarvestError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| HarvestError::sink(&path, e))?;
        }

        let has_content = append
            && fs::metadata(&path)
                .map(|meta| meta.len() > 0)
                .unwrap_or(false);

        let opened = if append {
            OpenOptions::new().create(true).append(true).open(&path)
        } else {
            File::create(&path)
        };
        let file = opened.map_err(|e| HarvestError::sink(&path, e))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !has_content {
            writer
                .write_record(ARTIST_COLUMNS)
                .map_err(|e| HarvestError::sink(&path, e))?;
            writer.flush().map_err(|e| HarvestError::sink(&path, e))?;
        }

        Ok(Self {
            path,
            writer,
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written by this sink, header excluded.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_records(&mut self, records: &[ArtistRecord]) -> Result<(), HarvestError> {
        for record in records {
            self.writer
                .serialize(ArtistCsvRow::from(record))
                .map_err(|e| HarvestError::sink(&self.path, e))?;
        }
        self.writer
            .flush()
            .map_err(|e| HarvestError::sink(&self.path, e))?;
        self.written += records.len();
        Ok(())
    }
}

#[async_trait]
impl RecordSink for ArtistCsvSink {
    async fn write_genre(
        &mut self,
        _genre: &Genre,
        records: &[ArtistRecord],
    ) -> Result<(), HarvestError> {
        self.write_records(records)
    }
}
