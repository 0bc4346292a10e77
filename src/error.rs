use std::path::PathBuf;

/// Why a single file produced no extraction.
///
/// These never abort a run: the pipeline logs them and keeps the file in the
/// graph with empty records.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("unsupported file extension: {}", .0.display())]
    UnsupportedLanguage(PathBuf),

    #[error("parser produced no syntax tree for {}", .0.display())]
    Parse(PathBuf),
}

/// Errors surfaced by file discovery and loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("project root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
