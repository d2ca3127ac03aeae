use std::path::Path;

use crate::{error::HarvestError, profile::ListeningProfile};

/// Writes the listening profile as pretty JSON, creating parent directories.
/// An existing file is replaced.
pub async fn save_profile(path: &Path, profile: &ListeningProfile) -> Result<(), HarvestError> {
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| HarvestError::sink(path, e))?;
    }

    let json = serde_json::to_string_pretty(profile).map_err(|e| HarvestError::sink(path, e))?;
    async_fs::write(path, json)
        .await
        .map_err(|e| HarvestError::sink(path, e))
}
