//! Passphrase-derived identity and session state
//!
//! The "password" here is an identity seed, not a verified credential: the
//! SHA-256 digest of the passphrase names the data partition the user can
//! see, and no party ever checks that a passphrase is "correct". Anyone who
//! learns the identity string could forge it.

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::info;

/// Derive the opaque partition identity from a passphrase.
///
/// Deterministic SHA-256, 64 lowercase hex characters. The same passphrase
/// always yields the same identity.
pub fn hash_passphrase(passphrase: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(passphrase.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Process-wide session marker, persisted to a file under the data root.
///
/// The marker survives restarts until `logout` clears it. Consumers that
/// need the current identity (the remote store in particular) hold a handle
/// to the session rather than reading ambient global state.
pub struct Session {
    path: PathBuf,
    identity: RwLock<Option<String>>,
}

impl Session {
    /// Load the persisted session marker, if any, from `path`.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let identity = std::fs::read_to_string(&path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if identity.is_some() {
            info!("Restored session from {}", path.display());
        }
        Self {
            path,
            identity: RwLock::new(identity),
        }
    }

    /// Derive, persist, and return the identity for `passphrase`.
    ///
    /// Fails with `EmptyCredential` when the passphrase is empty or
    /// whitespace-only.
    pub fn login(&self, passphrase: &str) -> Result<String> {
        if passphrase.trim().is_empty() {
            return Err(Error::EmptyCredential);
        }

        let identity = hash_passphrase(passphrase);
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &identity)?;

        let mut guard = self
            .identity
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(identity.clone());
        Ok(identity)
    }

    /// Clear the session marker unconditionally; idempotent.
    pub fn logout(&self) -> Result<()> {
        let mut guard = self
            .identity
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// True iff a session identity is currently persisted.
    pub fn is_authenticated(&self) -> bool {
        self.identity
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }

    /// The current identity, or `None` when not authenticated.
    pub fn identity(&self) -> Option<String> {
        self.identity
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Path of the persisted marker file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
