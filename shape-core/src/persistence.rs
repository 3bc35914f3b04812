//! Persistence collaborator - where exported documents go and imports come from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::DEFAULT_EXPORT_FILENAME;
use crate::EditorResult;

/// Saves and opens scene documents on behalf of the editor.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist an exported document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::Persistence`] if the document cannot be written.
    async fn save_document(&self, bytes: &[u8], suggested_filename: &str) -> EditorResult<()>;

    /// Read the document the user chose to import.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EditorError::Persistence`] if the document cannot be read.
    async fn open_document(&self) -> EditorResult<Vec<u8>>;
}

/// Filesystem-backed document store.
///
/// Saves go into `data_dir` under the suggested file name; opens read the
/// configured source file, which defaults to `data_dir/<filename>` with
/// `filename` starting out as `shapes.json`.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    data_dir: PathBuf,
    filename: String,
    source: Option<PathBuf>,
}

impl FileDocumentStore {
    /// Create a store rooted at `data_dir`. The directory is created on the
    /// first save.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
            source: None,
        }
    }

    /// Name of the file in `data_dir` that imports read by default. Should
    /// match the export file name the session saves under.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Read imports from `path` instead of the default file.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Directory that saves are written to.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File that imports are read from.
    #[must_use]
    pub fn source(&self) -> PathBuf {
        self.source
            .clone()
            .unwrap_or_else(|| self.data_dir.join(sanitize_filename(&self.filename)))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn save_document(&self, bytes: &[u8], suggested_filename: &str) -> EditorResult<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        let path = self.data_dir.join(sanitize_filename(suggested_filename));
        tokio::fs::write(&path, bytes).await?;
        tracing::info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    async fn open_document(&self) -> EditorResult<Vec<u8>> {
        let path = self.source();
        let bytes = tokio::fs::read(&path).await?;
        tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(bytes)
    }
}

/// Sanitize a suggested file name.
///
/// Replaces any character that is not alphanumeric, `-`, `_` or `.` with
/// `_`, and falls back to the default export name if nothing usable is left.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        DEFAULT_EXPORT_FILENAME.to_string()
    } else {
        cleaned
    }
}
