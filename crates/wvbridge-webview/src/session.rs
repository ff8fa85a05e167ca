//! Directory-backed persistence of saved view states.
//!
//! One JSON file per session, named after its [`SessionId`]. Lets a host
//! restore navigation history after the process is recreated.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};
use wvbridge_common::{BridgeError, SessionId};

use crate::state::SavedViewState;

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// A store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }

    pub fn save(&self, id: &SessionId, saved: &SavedViewState) -> Result<(), BridgeError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            BridgeError::Session(format!(
                "failed to create session directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let json = serde_json::to_vec_pretty(saved)
            .map_err(|e| BridgeError::Session(format!("failed to serialize session: {e}")))?;

        // Atomic replace.
        let path = self.path_for(id);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| {
            BridgeError::Session(format!("failed to write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            BridgeError::Session(format!("failed to replace {}: {e}", path.display()))
        })?;

        info!(session = %id, path = %path.display(), "session saved");
        Ok(())
    }

    /// `Ok(None)` when nothing was saved for `id`.
    pub fn load(&self, id: &SessionId) -> Result<Option<SavedViewState>, BridgeError> {
        let path = self.path_for(id);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(session = %id, "no saved session");
                return Ok(None);
            }
            Err(e) => {
                return Err(BridgeError::Session(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        let saved = serde_json::from_slice(&bytes).map_err(|e| {
            BridgeError::Session(format!("corrupt session file {}: {e}", path.display()))
        })?;
        debug!(session = %id, "session loaded");
        Ok(Some(saved))
    }

    /// Returns whether a saved session existed.
    pub fn remove(&self, id: &SessionId) -> Result<bool, BridgeError> {
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BridgeError::Session(format!(
                "failed to remove session {id}: {e}"
            ))),
        }
    }
}
