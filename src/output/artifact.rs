//! Artifact sinks
//!
//! An artifact is the extracted text of one article, keyed by the article
//! name the coordinator handed out (`wiki/Rust`).

use crate::CrawlError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

/// Destination for extracted article text
///
/// Writing an artifact replaces any previous artifact of the same name.
/// Implementations must be thread-safe: every worker shares one sink.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Stores `text` as the artifact for `name`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Where the artifact was written, for logging
    /// * `Err(CrawlError)` - The artifact could not be written
    async fn write_artifact(&self, name: &str, text: &str) -> Result<String, CrawlError>;
}

/// Writes artifacts as `<name>.txt` files under a root directory
///
/// Article names contain `/`, so `wiki/Rust` lands in `<root>/wiki/Rust.txt`;
/// missing directories are created.
#[derive(Debug, Clone)]
pub struct FileArtifactSink {
    root: PathBuf,
}

impl FileArtifactSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the file an article's artifact is written to
    ///
    /// Path segments that would leave the root (`..`, `.`, empty) are
    /// replaced with `_`.
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_relay::output::FileArtifactSink;
    /// use std::path::Path;
    ///
    /// let sink = FileArtifactSink::new("out");
    /// assert_eq!(sink.artifact_path("wiki/Rust"), Path::new("out/wiki/Rust.txt"));
    /// ```
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        let segments: Vec<&str> = name.trim_start_matches('/').split('/').collect();
        let last = segments.len() - 1;

        for (i, segment) in segments.iter().enumerate() {
            let segment = if is_plain_segment(segment) { segment } else { "_" };
            if i == last {
                path.push(format!("{}.txt", segment));
            } else {
                path.push(segment);
            }
        }

        path
    }
}

fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[async_trait]
impl ArtifactSink for FileArtifactSink {
    async fn write_artifact(&self, name: &str, text: &str) -> Result<String, CrawlError> {
        let path = self.artifact_path(name);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CrawlError::Artifact {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&path, text)
            .await
            .map_err(|source| CrawlError::Artifact {
                path: path.clone(),
                source,
            })?;

        Ok(path.display().to_string())
    }
}

/// Keeps artifacts in memory, keyed by article name
#[derive(Debug, Default)]
pub struct MemoryArtifactSink {
    artifacts: Mutex<BTreeMap<String, String>>,
}

impl MemoryArtifactSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text stored for `name`, if any
    pub fn get(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    /// Returns the stored article names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.artifacts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ArtifactSink for MemoryArtifactSink {
    async fn write_artifact(&self, name: &str, text: &str) -> Result<String, CrawlError> {
        self.lock().insert(name.to_string(), text.to_string());
        Ok(format!("memory:{}", name))
    }
}
