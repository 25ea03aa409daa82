use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use shared_models::auth::UserProfile;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Single-slot store for the signed-in profile, kept as one JSON file.
///
/// The file is the only persisted state of the dashboard. There is no
/// versioning: a file that no longer parses is thrown away and the user is
/// treated as signed out.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Option<UserProfile> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read stored profile at {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) => {
                debug!("Loaded stored profile for {}", profile.email);
                Some(profile)
            }
            Err(e) => {
                warn!("Discarding malformed stored profile at {}: {}", self.path.display(), e);
                if let Err(e) = fs::remove_file(&self.path).await {
                    warn!("Failed to remove malformed profile: {}", e);
                }
                None
            }
        }
    }

    pub async fn save(&self, profile: &UserProfile) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let raw = serde_json::to_string(profile)?;
        fs::write(&self.path, raw).await?;

        info!("Stored profile for {} ({})", profile.email, profile.role);
        Ok(())
    }

    /// Removes the stored profile. Returns whether one was present.
    pub async fn clear(&self) -> Result<bool, SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Cleared stored profile");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
