//! The benchmark corpus.

use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};

/// Immutable text every candidate chunks.
///
/// Loaded once, then only borrowed. Invalid UTF-8 (enwik8 contains some) is
/// replaced with U+FFFD so that every chunker sees the same `&str`.
#[derive(Debug, Clone)]
pub struct Corpus {
    name: String,
    text: String,
}

impl Corpus {
    /// Read a corpus file.
    ///
    /// # Errors
    ///
    /// [`Error::CorpusRead`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::CorpusRead {
            path: path.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        info!(corpus = %name, bytes = text.len(), "loaded corpus");
        Ok(Self { name, text })
    }

    /// Build a corpus from text already in memory.
    #[must_use]
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Display name (file name for loaded corpora).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The corpus text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the corpus is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Size in decimal megabytes.
    #[must_use]
    pub fn size_mb(&self) -> f64 {
        self.text.len() as f64 / 1e6
    }
}
