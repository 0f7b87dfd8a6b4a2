//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! wall lives in a single JSON file; reads go straight to disk and writes
//! are serialized behind one async mutex so two saves never interleave their
//! temp-file/rename steps.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Shared application state. Clone is required by Axum; the lock is shared.
#[derive(Clone)]
pub struct AppState {
    pub data_file: Arc<PathBuf>,
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    #[must_use]
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file: Arc::new(data_file), write_lock: Arc::new(Mutex::new(())) }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// State backed by a fresh file path under the system temp dir. The file
    /// itself is not created.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(scratch_file())
    }

    #[must_use]
    pub fn scratch_file() -> PathBuf {
        std::env::temp_dir()
            .join(format!("wallboard-test-{}", uuid::Uuid::new_v4()))
            .join("wall-images.json")
    }
}
