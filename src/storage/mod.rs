/// Profile photo blob store
///
/// Opaque per-user blob storage with the three operations the profile layer
/// needs: set, clear, exists. Backed by a directory on local disk; the
/// returned key is what gets recorded on the profile row.
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::Result;

#[derive(Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the backing directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn key_for(user_id: Uuid) -> String {
        format!("{}.img", user_id)
    }

    fn path_for(&self, user_id: Uuid) -> PathBuf {
        self.root.join(Self::key_for(user_id))
    }

    /// Store (or replace) a user's photo; returns the blob key.
    pub async fn set(&self, user_id: Uuid, bytes: &[u8]) -> Result<String> {
        tokio::fs::write(self.path_for(user_id), bytes).await?;
        Ok(Self::key_for(user_id))
    }

    /// Remove a user's photo. Returns `false` if none was stored.
    pub async fn clear(&self, user_id: Uuid) -> Result<bool> {
        match tokio::fs::remove_file(self.path_for(user_id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists(&self, user_id: Uuid) -> bool {
        tokio::fs::try_exists(self.path_for(user_id))
            .await
            .unwrap_or(false)
    }
}
