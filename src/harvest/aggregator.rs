use crate::{
    error::HarvestError,
    types::{ArtistRecord, Genre},
    warning,
};

use super::{ArtistSearch, Collector, RecordSink, rank};

/// Number of candidates collected per genre before ranking.
pub const DEFAULT_POOL_SIZE: usize = 100;

/// What happened to one genre during a run.
#[derive(Debug)]
pub struct GenreReport {
    /// 1-based position in the genre list.
    pub index: usize,
    pub genre: Genre,
    pub found: usize,
    /// `SearchRequestFailed` for a truncated or skipped genre, `GenreFailed`
    /// when the catalog had nothing.
    pub error: Option<HarvestError>,
}

impl GenreReport {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn status(&self) -> &'static str {
        match (&self.error, self.found) {
            (None, _) => "ok",
            (Some(HarvestError::GenreFailed { .. }), _) => "empty",
            (Some(_), 0) => "skipped",
            (Some(_), _) => "partial",
        }
    }
}

#[derive(Debug, Default)]
pub struct HarvestSummary {
    pub reports: Vec<GenreReport>,
    pub records: usize,
}

impl HarvestSummary {
    pub fn failed(&self) -> impl Iterator<Item = &GenreReport> {
        self.reports.iter().filter(|r| !r.is_complete())
    }
}

/// Progress notifications emitted while a run is going on.
#[derive(Debug)]
pub enum Progress<'r> {
    Started {
        index: usize,
        total: usize,
        genre: &'r Genre,
    },
    Finished {
        total: usize,
        report: &'r GenreReport,
    },
}

/// Runs collection and ranking for every genre of a list.
pub struct Harvester<'a, S: ArtistSearch + ?Sized> {
    collector: Collector<'a, S>,
    pool_size: usize,
}

impl<'a, S: ArtistSearch + ?Sized> Harvester<'a, S> {
    pub fn new(collector: Collector<'a, S>) -> Self {
        Self {
            collector,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Candidates to collect per genre. The effective quota never drops
    /// below the per-genre limit of a run.
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Collects the top `per_genre_limit` artists of every genre and returns
    /// them concatenated in genre order.
    pub async fn run(&self, genres: &[Genre], per_genre_limit: usize) -> Vec<ArtistRecord> {
        let mut records: Vec<ArtistRecord> = Vec::new();
        if let Err(e) = self
            .run_into(genres, per_genre_limit, &mut records, |_| {})
            .await
        {
            warning!("Harvest stopped early: {}", e);
        }
        records
    }

    /// Like [`Harvester::run`], but streams each genre's ranked artists into
    /// `sink` as soon as the genre is done.
    ///
    /// # Arguments
    ///
    /// * `genres` - Genres to process, strictly in this order
    /// * `per_genre_limit` - Artists kept per genre after ranking
    /// * `sink` - Receives one batch per genre
    /// * `observer` - Called with [`Progress::Started`] before and
    ///   [`Progress::Finished`] after each genre
    ///
    /// # Per-genre outcome
    ///
    /// | collection result           | report error          | written to sink |
    /// |-----------------------------|-----------------------|-----------------|
    /// | artists, no error           | none                  | yes             |
    /// | no artists, no error        | `GenreFailed`         | yes, empty      |
    /// | artists, page failed        | `SearchRequestFailed` | yes, partial    |
    /// | no artists, page failed     | `SearchRequestFailed` | no              |
    ///
    /// A genre that is not written counts as skipped; a checkpointing sink
    /// therefore never marks it done and a resumed run retries it.
    ///
    /// # Errors
    ///
    /// Only a failing sink aborts the run, leaving the genres flushed so far
    /// in the sink. Search failures and empty genres are recorded on the
    /// genre's [`GenreReport`] and the run moves on.
    pub async fn run_into<K, F>(
        &self,
        genres: &[Genre],
        per_genre_limit: usize,
        sink: &mut K,
        mut observer: F,
    ) -> Result<HarvestSummary, HarvestError>
    where
        K: RecordSink + ?Sized,
        F: FnMut(Progress<'_>),
    {
        let total = genres.len();
        let quota = self.pool_size.max(per_genre_limit);
        let mut summary = HarvestSummary::default();

        for (i, genre) in genres.iter().enumerate() {
            let index = i + 1;
            observer(Progress::Started {
                index,
                total,
                genre,
            });

            let collection = self.collector.collect(genre, quota).await;
            let ranked = rank(collection.records, per_genre_limit);

            let error = match collection.error {
                Some(e) => {
                    if ranked.is_empty() {
                        warning!("Skipping genre '{}': no artists could be fetched", genre);
                    }
                    Some(e)
                }
                None if ranked.is_empty() => {
                    warning!("No artists found for genre '{}'", genre);
                    Some(HarvestError::GenreFailed {
                        genre: genre.to_string(),
                    })
                }
                None => None,
            };

            let skipped = ranked.is_empty()
                && matches!(error, Some(HarvestError::SearchRequestFailed { .. }));
            if !skipped {
                sink.write_genre(genre, &ranked).await?;
            }

            let report = GenreReport {
                index,
                genre: genre.clone(),
                found: ranked.len(),
                error,
            };
            summary.records += report.found;
            observer(Progress::Finished {
                total,
                report: &report,
            });
            summary.reports.push(report);
        }

        Ok(summary)
    }
}
