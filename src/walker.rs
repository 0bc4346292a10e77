use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::DepTracerConfig;
use crate::error::{Error, Result};
use crate::language::SOURCE_EXTENSIONS;
use crate::source::SourceFile;

/// A discovered file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: PathBuf,
    pub reason: String,
}

/// The result of discovering and reading a project's source files.
#[derive(Debug, Default)]
pub struct LoadedSources {
    pub sources: Vec<SourceFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Walk a project directory and collect source file paths, sorted.
///
/// Respects `.gitignore` rules, always excludes `node_modules`, and applies
/// `config.exclude_dirs` and the `config.exclude` glob patterns.
pub fn walk_project(root: &Path, config: &DepTracerConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(true)
        // Read .gitignore files even when the directory is not inside a git repository.
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("{err}");
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(true) {
            continue;
        }

        let relative = path.strip_prefix(root).unwrap_or(path);
        if in_excluded_dir(relative, config) || is_excluded_by_config(relative, config) {
            continue;
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !SOURCE_EXTENSIONS.contains(&ext) {
            continue;
        }

        tracing::debug!("{}", path.display());
        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Discover and read every source file under `root`.
///
/// Files that cannot be read as UTF-8 are logged and reported in `skipped`;
/// they never abort the walk.
pub fn load_sources(root: &Path, config: &DepTracerConfig) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();

    for path in walk_project(root, config)? {
        match SourceFile::read(&path) {
            Ok(source) => loaded.sources.push(source),
            Err(err) => {
                tracing::warn!("skipping {}: {err}", path.display());
                loaded.skipped.push(SkippedFile {
                    file: path,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(loaded)
}

/// Returns true if a directory component of `relative` is `node_modules` or
/// one of `config.exclude_dirs`.
fn in_excluded_dir(relative: &Path, config: &DepTracerConfig) -> bool {
    let Some(parent) = relative.parent() else {
        return false;
    };
    parent.components().any(|c| {
        c.as_os_str().to_str().is_some_and(|s| {
            s == "node_modules" || config.exclude_dirs.iter().any(|d| d == s)
        })
    })
}

/// Returns true if `relative` matches any exclusion pattern from config.
fn is_excluded_by_config(relative: &Path, config: &DepTracerConfig) -> bool {
    let path_str = relative.to_string_lossy();

    for pattern in &config.exclude {
        let Ok(matcher) = glob::Pattern::new(pattern) else {
            continue;
        };
        if matcher.matches(&path_str) {
            return true;
        }
        // Also check if any component matches the pattern directly.
        if relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|s| matcher.matches(s))
        {
            return true;
        }
    }

    false
}
