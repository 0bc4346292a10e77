use std::path::Path;

use serde::Deserialize;

use crate::query::DEFAULT_TOP_CENTRAL;

/// File name looked up at the project root.
pub const CONFIG_FILE: &str = "dep-tracer.toml";

/// Configuration loaded from `dep-tracer.toml` at the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DepTracerConfig {
    /// Glob patterns excluded from discovery, matched against the full path and
    /// each path component.
    pub exclude: Vec<String>,
    /// Directory names skipped wherever they occur. `node_modules` is always
    /// skipped, even when this list omits it.
    pub exclude_dirs: Vec<String>,
    /// How many files the centrality ranking reports.
    pub top_central: usize,
    /// Entry points for the active-file trace, relative to the project root.
    /// Empty means probe the conventional locations (`src/index.js`, ...).
    pub entry_points: Vec<String>,
}

impl Default for DepTracerConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            exclude_dirs: vec!["node_modules".into(), "build".into(), "dist".into()],
            top_central: DEFAULT_TOP_CENTRAL,
            entry_points: Vec::new(),
        }
    }
}

impl DepTracerConfig {
    /// Load configuration from `dep-tracer.toml` in the given root directory.
    ///
    /// Returns the defaults if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("failed to parse {CONFIG_FILE}: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                tracing::warn!("failed to read {CONFIG_FILE}: {err}. Using defaults.");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = DepTracerConfig::load(dir.path());
        assert_eq!(config, DepTracerConfig::default());
        assert_eq!(config.top_central, 10);
        assert!(config.exclude_dirs.contains(&"dist".to_string()));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "top_central = 3\nexclude = [\"*.test.js\"]\n").unwrap();
        let config = DepTracerConfig::load(dir.path());
        assert_eq!(config.top_central, 3);
        assert_eq!(config.exclude, vec!["*.test.js".to_string()]);
        assert_eq!(config.exclude_dirs, DepTracerConfig::default().exclude_dirs);
    }

    #[test]
    fn test_entry_points_are_read() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "entry_points = [\"src/server.ts\", \"src/worker.ts\"]\n").unwrap();
        let config = DepTracerConfig::load(dir.path());
        assert_eq!(config.entry_points, vec!["src/server.ts".to_string(), "src/worker.ts".to_string()]);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join(CONFIG_FILE), "top_central = \"many\"").unwrap();
        assert_eq!(DepTracerConfig::load(dir.path()), DepTracerConfig::default());
    }
}
