//! Persistence service: the wall document on disk.
//!
//! DESIGN
//! ======
//! The document is `{ "images": [...] }`, pretty-printed. Image entries are
//! kept as opaque JSON so fields added by newer clients survive a save made
//! by an older one.
//!
//! ERROR HANDLING
//! ==============
//! Reads fail open: a missing, unreadable or malformed file is an empty
//! wall (logged). Writes go to a sibling temp file that is renamed over the
//! target, so a failed write never leaves a truncated document behind.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// On-disk and on-wire shape of the wall.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallDocument {
    pub images: Vec<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("wall file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("wall document encode: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Load the wall, or an empty one if the file cannot be used.
pub async fn read_wall(path: &Path) -> WallDocument {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "wall file absent; serving empty wall");
            return WallDocument::default();
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "wall file unreadable; serving empty wall");
            return WallDocument::default();
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "wall file malformed; serving empty wall");
            WallDocument::default()
        }
    }
}

/// Replace the wall file with `doc`.
///
/// # Errors
///
/// [`PersistenceError`] if the document cannot be encoded, the temp file
/// cannot be written, or the rename fails. The previous file is untouched
/// in every case.
pub async fn write_wall(path: &Path, doc: &WallDocument) -> Result<(), PersistenceError> {
    let body = serde_json::to_vec_pretty(doc)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = temp_path(path);
    if let Err(e) = tokio::fs::write(&tmp, &body).await {
        discard_temp(&tmp).await;
        return Err(e.into());
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        discard_temp(&tmp).await;
        return Err(e.into());
    }
    info!(path = %path.display(), images = doc.images.len(), bytes = body.len(), "wall saved");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
}

async fn discard_temp(tmp: &Path) {
    if let Err(e) = tokio::fs::remove_file(tmp).await {
        if e.kind() != ErrorKind::NotFound {
            warn!(error = %e, path = %tmp.display(), "failed to remove temp wall file");
        }
    }
}
