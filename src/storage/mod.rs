//! Receipt file storage
//!
//! Uploaded files live under a per-user subdirectory of the upload root. The
//! stored filename is always synthesized (time prefix + random suffix + the
//! original extension) — the client-supplied filename is trusted only for
//! its extension. References handed back to clients are relative paths with
//! forward slashes on every platform.

use std::path::{Path, PathBuf};

use rand::Rng;
use uuid::Uuid;

/// Disk-backed store for uploaded receipt files.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that backs the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `data` under the owner's namespace, creating the directory on
    /// first use. Returns the relative reference (`<owner>/<filename>`).
    pub async fn store(
        &self,
        owner: Uuid,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, std::io::Error> {
        let owner_dir = self.root.join(owner.to_string());
        tokio::fs::create_dir_all(&owner_dir).await?;

        let filename = synthetic_name(original_name);
        tokio::fs::write(owner_dir.join(&filename), data).await?;

        Ok(format!("{}/{}", owner, filename))
    }
}

/// Collision-resistant stored name: `<unix millis>-<random><ext>`.
fn synthetic_name(original_name: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen();
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    format!("{}-{}{}", chrono::Utc::now().timestamp_millis(), suffix, ext)
}
