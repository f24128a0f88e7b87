//! Evidence photo storage.
//!
//! [`PhotoStore`] owns the upload directory and is the only component that
//! touches photo binaries. Stored names are produced by
//! `vistoria_core::evidence` (sanitized, prefixed with the answer id and a
//! random token), and retrieval refuses any name that would not survive
//! sanitization unchanged, so reads can never escape the root.

use std::path::PathBuf;

use rand::Rng;
use vistoria_core::evidence;
use vistoria_core::types::DbId;

/// File store for evidence photos, rooted at the configured upload directory.
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Build a collision-free stored name for a photo attached to `answer_id`.
    pub fn stored_name(answer_id: DbId, original: &str) -> String {
        let token: u32 = rand::rng().random();
        evidence::stored_filename(answer_id, &format!("{token:08x}"), original)
    }

    /// Write photo bytes under an internally generated stored name.
    pub async fn save(&self, stored: &str, bytes: &[u8]) -> std::io::Result<()> {
        debug_assert!(evidence::is_safe_filename(stored));
        tokio::fs::write(self.root.join(stored), bytes).await
    }

    /// Read a stored photo. Returns `None` for unknown names and for any
    /// name that is not a safe stored name (path traversal attempts).
    pub async fn load(&self, name: &str) -> std::io::Result<Option<Vec<u8>>> {
        if !evidence::is_safe_filename(name) {
            return Ok(None);
        }
        match tokio::fs::read(self.root.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Best-effort removal, used when rolling back a failed submission or
    /// cascading an inspection delete. Missing files are not an error.
    pub async fn remove(&self, name: &str) {
        if !evidence::is_safe_filename(name) {
            return;
        }
        if let Err(err) = tokio::fs::remove_file(self.root.join(name)).await {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(file = %name, error = %err, "Failed to remove photo file");
            }
        }
    }
}
