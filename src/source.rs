use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::language::SourceLanguage;

/// One scanned file: its absolute path, raw text, and discovered language.
///
/// Immutable once read. A rescan builds new values.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    /// `None` when the extension is unknown; such files are still graph nodes
    /// but produce no records.
    pub language: Option<SourceLanguage>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let language = SourceLanguage::from_path(&path);
        Self {
            path,
            text: text.into(),
            language,
        }
    }

    /// Read a file from disk as UTF-8.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(path, text))
    }
}
