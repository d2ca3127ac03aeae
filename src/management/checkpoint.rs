use std::path::Path;

use async_trait::async_trait;

use crate::{
    error::HarvestError,
    harvest::{HarvestSummary, RecordSink},
    types::{ArtistRecord, Genre},
    warning,
};

use super::{ArtistCsvSink, HarvestState};

/// How a harvest run starts relative to earlier runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Output truncated, previous progress forgotten.
    Fresh,
    /// Output continued, genres of the previous run skipped.
    Resumed { completed: usize },
}

/// Artist CSV output paired with the list of genres already flushed to it.
///
/// Every finished genre is appended to the CSV first and recorded in the
/// [`HarvestState`] second, so the state never names a genre the output does
/// not hold.
pub struct CheckpointSink {
    csv: ArtistCsvSink,
    state: HarvestState,
    mode: RunMode,
}

/// Genres still to harvest together with the sink they go to.
pub struct Checkpoint {
    pub pending: Vec<Genre>,
    pub sink: CheckpointSink,
}

impl CheckpointSink {
    /// Prepares the output and state for a run over `genres`.
    ///
    /// With `resume`, a loadable state keeps the existing output (appending
    /// to it) and drops the genres it lists from `pending`. Without a state
    /// to resume from there is no way to tell which rows of the output are
    /// complete, so the run starts fresh: the output is truncated and every
    /// genre is pending. This also covers resuming after a run that finished
    /// and cleared its state.
    ///
    /// # Errors
    ///
    /// [`HarvestError::SinkError`] when the output or the state file cannot
    /// be prepared.
    pub async fn open(
        output: &Path,
        mut state: HarvestState,
        genres: Vec<Genre>,
        resume: bool,
    ) -> Result<Checkpoint, HarvestError> {
        if resume {
            match state.load().await {
                Ok(loaded) => {
                    let pending = genres.into_iter().filter(|g| !loaded.has(g)).collect();
                    let mode = RunMode::Resumed {
                        completed: loaded.completed().len(),
                    };
                    let sink = CheckpointSink {
                        csv: ArtistCsvSink::append(output)?,
                        state: loaded,
                        mode,
                    };
                    return Ok(Checkpoint { pending, sink });
                }
                Err(e) => warning!(
                    "No previous harvest state to resume from ({}), starting over",
                    e
                ),
            }
        }

        state
            .clear()
            .await
            .map_err(|e| HarvestError::sink(state.path(), e))?;

        Ok(Checkpoint {
            pending: genres,
            sink: CheckpointSink {
                csv: ArtistCsvSink::create(output)?,
                state,
                mode: RunMode::Fresh,
            },
        })
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn csv(&self) -> &ArtistCsvSink {
        &self.csv
    }

    pub fn state(&self) -> &HarvestState {
        &self.state
    }

    /// Closes the run: forgets the state when every genre was flushed, keeps
    /// it when some genre was skipped so `--resume` retries exactly those.
    ///
    /// Returns `true` when the state was kept.
    pub async fn finish(&mut self, summary: &HarvestSummary) -> Result<bool, HarvestError> {
        let skipped = summary.reports.iter().any(|r| r.status() == "skipped");
        if skipped {
            return Ok(true);
        }

        self.state
            .clear()
            .await
            .map_err(|e| HarvestError::sink(self.state.path(), e))?;
        Ok(false)
    }
}

#[async_trait]
impl RecordSink for CheckpointSink {
    async fn write_genre(
        &mut self,
        genre: &Genre,
        records: &[ArtistRecord],
    ) -> Result<(), HarvestError> {
        self.csv.write_records(records)?;
        self.state.add(genre);
        self.state
            .persist()
            .await
            .map_err(|e| HarvestError::sink(self.state.path(), e))
    }
}
