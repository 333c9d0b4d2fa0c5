//! Incremental artifact store
//!
//! One markdown file per URL key under a fixed output directory. The
//! presence of the file is the existence state; there is no manifest.
//! Writes are gated on a content fingerprint so an unchanged artifact
//! is never rewritten.

mod fingerprint;

pub use fingerprint::fingerprint;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during store operations
///
/// A store error is fatal for that single save and must reach the
/// caller; silent data loss is unacceptable. It must not abort the
/// rest of the pipeline.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read existing artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Outcome of saving an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No prior artifact existed; the file was written
    Created,
    /// A prior artifact existed with different content; overwritten
    Updated,
    /// A prior artifact existed with identical content; no write
    Unchanged,
}

/// Fingerprint-gated file store for derived markdown artifacts
pub struct MirrorStore {
    root: PathBuf,
}

impl MirrorStore {
    /// Creates a store rooted at `root`
    ///
    /// The directory is not created until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the artifact file for a URL key
    pub fn artifact_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.md", key))
    }

    /// Saves an artifact under a URL key, skipping unchanged content
    ///
    /// Reads the prior artifact (if any), compares fingerprints, and
    /// writes only on a mismatch or first sight. This read-then-write
    /// sequence is not protected against concurrent writers of the
    /// same key; the pipeline processes each key exactly once per run.
    ///
    /// # Arguments
    ///
    /// * `key` - Normalized URL key (see [`crate::url::artifact_key`])
    /// * `artifact` - The derived markdown content
    ///
    /// # Returns
    ///
    /// * `Ok(SaveOutcome)` - What happened to the file
    /// * `Err(StoreError)` - The save failed; nothing was written
    pub fn save(&self, key: &str, artifact: &str) -> StoreResult<SaveOutcome> {
        let path = self.artifact_path(key);

        let existing = match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source: e,
                })
            }
        };

        let outcome = match existing {
            Some(content) => {
                if fingerprint(content.as_bytes()) == fingerprint(artifact.as_bytes()) {
                    tracing::info!("Skipping {}.md - no changes detected", key);
                    return Ok(SaveOutcome::Unchanged);
                }
                SaveOutcome::Updated
            }
            None => SaveOutcome::Created,
        };

        fs::create_dir_all(&self.root).map_err(|e| StoreError::CreateDir {
            path: self.root.clone(),
            source: e,
        })?;

        fs::write(&path, artifact).map_err(|e| StoreError::Write {
            path: path.clone(),
            source: e,
        })?;

        match outcome {
            SaveOutcome::Created => tracing::info!("Saving {}.md", key),
            SaveOutcome::Updated => tracing::info!("Updating {}.md", key),
            SaveOutcome::Unchanged => unreachable!(),
        }

        Ok(outcome)
    }
}
