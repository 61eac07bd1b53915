//! Saved documents keyed by name.
//!
//! The core only ever hands raw text to a store and gets raw text back; any
//! backend implementing [`DocumentStore`] will do. [`FsDocumentStore`] keeps
//! one file per document in a directory. Writes are last-write-wins.

use anyhow::{Context, Result, bail};
use globset::Glob;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Listing entry for a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredDocument {
    pub name: String,
    /// Last modification, seconds since the Unix epoch
    pub updated: u64,
}

pub trait DocumentStore {
    /// All documents, most recently updated first
    fn list(&self) -> Result<Vec<StoredDocument>>;

    fn read(&self, name: &str) -> Result<String>;

    fn write(&self, name: &str, content: &str) -> Result<()>;

    /// Documents whose name matches a glob such as `*3A4*`
    fn list_matching(&self, pattern: &str) -> Result<Vec<StoredDocument>> {
        let matcher = Glob::new(pattern)
            .with_context(|| format!("Invalid pattern: {}", pattern))?
            .compile_matcher();

        Ok(self
            .list()?
            .into_iter()
            .filter(|doc| matcher.is_match(&doc.name))
            .collect())
    }
}

/// Directory-backed store
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    dir: PathBuf,
}

impl FsDocumentStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }
}

impl DocumentStore for FsDocumentStore {
    fn list(&self) -> Result<Vec<StoredDocument>> {
        let mut docs = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }

            let updated = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);

            docs.push(StoredDocument {
                name: entry.file_name().to_string_lossy().into_owned(),
                updated,
            });
        }

        docs.sort_by(|a, b| b.updated.cmp(&a.updated).then_with(|| a.name.cmp(&b.name)));
        Ok(docs)
    }

    fn read(&self, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        fs::read_to_string(&path).with_context(|| format!("Failed to read document '{}'", name))
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path_for(name)?;
        fs::write(&path, content).with_context(|| format!("Failed to write document '{}'", name))?;
        tracing::info!(name, bytes = content.len(), "document saved");
        Ok(())
    }
}

/// Names map straight to file names, so anything that could escape the
/// store directory is rejected
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Document name is empty");
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        bail!("Invalid document name: {}", name);
    }
    Ok(())
}
