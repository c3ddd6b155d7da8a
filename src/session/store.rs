//! File-backed session storage

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SESSION_KEY, Session, SessionProvider};
use crate::error::Result;

/// Persists the session as one JSON object in `<dir>/user.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store rooted at `dir`, using the fixed session key as file name
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SESSION_KEY)),
        }
    }

    /// Location of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionProvider for FileSessionStore {
    fn load(&self) -> Option<Session> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read session {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!(
                    "Ignoring unusable session data in {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string(session)?;
        std::fs::write(&self.path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        log::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
