//! File and in-memory element sources.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ElementSource, SourceError};

/// Element text read from a local file on every `fetch`.
#[derive(Debug, Clone)]
pub struct FileElementSource {
    path: PathBuf,
}

impl FileElementSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ElementSource for FileElementSource {
    fn fetch(&self) -> Result<String, SourceError> {
        debug!(path = %self.path.display(), "Reading element text");
        let bytes = std::fs::read(&self.path).map_err(|e| SourceError::io(&self.path, &e))?;
        String::from_utf8(bytes).map_err(|_| SourceError::InvalidUtf8)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Element text held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticElementSource {
    text: String,
}

impl StaticElementSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ElementSource for StaticElementSource {
    fn fetch(&self) -> Result<String, SourceError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        "in-memory element text".to_string()
    }
}
