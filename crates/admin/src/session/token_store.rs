//! The persisted `auth_token` slot.
//!
//! One file holding one opaque token. Read at startup, written on login,
//! removed on logout or when the backend rejects the token.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Errors from reading or writing the token file.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("failed to read token file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write token file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to remove token file {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// File-backed token slot.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted token. A missing or blank file is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Read`] if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<SecretString>, TokenStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_owned())))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(TokenStoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Persist `token`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Write`] on any filesystem failure.
    pub fn save(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        let write_err = |source| TokenStoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(write_err)?;
        file.write_all(token.expose_secret().as_bytes())
            .map_err(write_err)
    }

    /// Remove the persisted token. Removing an absent token is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Remove`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(TokenStoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("auth_token"));

        assert!(store.load().unwrap().is_none());

        store.save(&SecretString::from("tok-abc")).unwrap();
        assert_eq!(store.load().unwrap().unwrap().expose_secret(), "tok-abc");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_is_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth_token");
        fs::write(&path, "  \n").unwrap();
        assert!(TokenStore::new(path).load().unwrap().is_none());
    }
}
