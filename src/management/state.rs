use std::{io::ErrorKind, path::PathBuf};

use thiserror::Error;

use crate::{config, types::Genre};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state file I/O failed: {0}")]
    IoError(#[from] std::io::Error),
    #[error("state file is corrupt: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Genres a harvest run already flushed to its output, so an interrupted run
/// can resume where it stopped.
pub struct HarvestState {
    path: PathBuf,
    completed: Vec<String>,
}

impl HarvestState {
    pub fn new() -> Self {
        let mut path = config::app_dir();
        path.push("state/harvest.json");
        Self::at(path)
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            completed: Vec::new(),
        }
    }

    pub async fn load(&self) -> Result<Self, StateError> {
        let json = async_fs::read_to_string(&self.path).await?;
        let completed: Vec<String> = serde_json::from_str(&json)?;
        Ok(Self {
            path: self.path.clone(),
            completed,
        })
    }

    pub async fn persist(&self) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.completed)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn add(&mut self, genre: &Genre) {
        if !self.has(genre) {
            self.completed.push(genre.to_string());
        }
    }

    pub fn has(&self, genre: &Genre) -> bool {
        self.completed.iter().any(|g| g == genre.as_str())
    }

    pub fn completed(&self) -> &[String] {
        &self.completed
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Forgets all progress and removes the state file.
    pub async fn clear(&mut self) -> Result<(), StateError> {
        self.completed.clear();
        match async_fs::remove_file(&self.path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(StateError::IoError(e)),
            _ => Ok(()),
        }
    }
}

impl Default for HarvestState {
    fn default() -> Self {
        Self::new()
    }
}
