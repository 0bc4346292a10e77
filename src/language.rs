use std::path::Path;

/// The language of a scanned source file, discovered from its extension.
///
/// Uses a plain enum (not trait objects) so it is cheap to copy and
/// pattern-matched at grammar dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// `.js`, `.jsx`, `.mjs`, `.cjs`. Parsed with the JavaScript grammar, which accepts JSX.
    JavaScript,
    /// `.ts`, `.mts`, `.cts`.
    TypeScript,
    /// `.tsx`.
    Tsx,
    /// `.json`. Never parsed; present only so imports can resolve to it.
    Json,
}

/// Extensions picked up by file discovery.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "mts", "cts", "tsx", "json"];

impl SourceLanguage {
    /// Map a bare extension (no leading dot) to a language.
    pub fn from_extension(ext: &str) -> Option<SourceLanguage> {
        match ext {
            "js" | "jsx" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            "json" => Some(SourceLanguage::Json),
            _ => None,
        }
    }

    /// Map a path to a language using its extension.
    pub fn from_path(path: &Path) -> Option<SourceLanguage> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(SourceLanguage::from_extension)
    }

    /// Whether files of this language carry import/export syntax worth parsing.
    pub fn is_parsed(&self) -> bool {
        !matches!(self, SourceLanguage::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_extension() {
        assert_eq!(SourceLanguage::from_extension("jsx"), Some(SourceLanguage::JavaScript));
        assert_eq!(SourceLanguage::from_extension("cjs"), Some(SourceLanguage::JavaScript));
        assert_eq!(SourceLanguage::from_extension("ts"), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::from_extension("tsx"), Some(SourceLanguage::Tsx));
        assert_eq!(SourceLanguage::from_extension("json"), Some(SourceLanguage::Json));
        assert_eq!(SourceLanguage::from_extension("rs"), None);
    }

    #[test]
    fn test_from_path_without_extension() {
        assert_eq!(SourceLanguage::from_path(&PathBuf::from("/proj/Makefile")), None);
        assert_eq!(
            SourceLanguage::from_path(&PathBuf::from("/proj/src/app.tsx")),
            Some(SourceLanguage::Tsx)
        );
    }

    #[test]
    fn test_json_is_not_parsed() {
        assert!(!SourceLanguage::Json.is_parsed());
        assert!(SourceLanguage::JavaScript.is_parsed());
    }
}
