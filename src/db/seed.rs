use sea_orm::DatabaseConnection;
use std::path::Path;

use super::profile::{create_profile, profile_exists};
use crate::error::ProfileError;
use crate::models::profiles::ProfileInput;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Seed file is not a valid profile document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Store the profile document at `path` when no profile exists yet.
/// Returns whether a profile was created. A missing file is not an error.
pub async fn seed_if_empty(db: &DatabaseConnection, path: &Path) -> Result<bool, SeedError> {
    if profile_exists(db).await.map_err(ProfileError::from)? {
        return Ok(false);
    }

    if !tokio::fs::try_exists(path).await? {
        tracing::info!("No seed file at {}, starting without a profile", path.display());
        return Ok(false);
    }

    let raw = tokio::fs::read_to_string(path).await?;
    let input: ProfileInput = serde_json::from_str(&raw)?;

    match create_profile(db, input).await {
        Ok(profile) => {
            tracing::info!(profile_id = profile.id, "Seeded profile from {}", path.display());
            Ok(true)
        }
        // Another instance seeded first.
        Err(ProfileError::AlreadyExists | ProfileError::Conflict) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
