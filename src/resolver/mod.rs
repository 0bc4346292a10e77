use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Extensions probed, in order, after the exact path and again under `/index`.
pub const RESOLVE_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".json"];

/// Where an import specifier points.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedTarget {
    /// A scanned file from the candidate set.
    File(PathBuf),
    /// An external package, keyed by the raw specifier. Never resolved further.
    Package(String),
}

/// Resolve `specifier` as written in `from_file` against the scanned file set.
///
/// Path specifiers (`./x`, `../x`, `/x`) try, in order: the normalised path
/// itself, the path with each of [`RESOLVE_EXTENSIONS`] appended, then
/// `path/index` with each extension. The first candidate present in
/// `known_files` wins. When none is present the result is `None`: a resolution
/// gap, never a fabricated node.
///
/// Any other specifier is an opaque package.
///
/// The result depends only on the three arguments; the candidate list is fixed
/// and finite, so resolution always terminates.
pub fn resolve(
    from_file: &Path,
    specifier: &str,
    known_files: &HashSet<PathBuf>,
) -> Option<ResolvedTarget> {
    if !is_path_specifier(specifier) {
        return Some(ResolvedTarget::Package(specifier.to_owned()));
    }

    let base = resolve_lexically(from_file, specifier);
    candidates(&base)
        .into_iter()
        .find(|candidate| known_files.contains(candidate))
        .map(ResolvedTarget::File)
}

/// Returns `true` for relative (`.`-prefixed) and absolute (`/`-prefixed) specifiers.
pub fn is_path_specifier(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

/// Join `specifier` onto the importing file's directory and normalise `.`/`..`
/// components without consulting the filesystem.
pub fn resolve_lexically(from_file: &Path, specifier: &str) -> PathBuf {
    let dir = from_file.parent().unwrap_or_else(|| Path::new(""));
    dir.join(specifier).clean()
}

fn candidates(base: &Path) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(1 + RESOLVE_EXTENSIONS.len() * 2);
    out.push(base.to_path_buf());
    out.extend(RESOLVE_EXTENSIONS.iter().map(|ext| with_suffix(base, ext)));
    let index = base.join("index");
    out.extend(RESOLVE_EXTENSIONS.iter().map(|ext| with_suffix(&index, ext)));
    out
}

/// Append `suffix` to the final path component (`a/b` + `.js` → `a/b.js`,
/// `a/b.test` + `.js` → `a/b.test.js`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_owned();
    s.push(suffix);
    PathBuf::from(s)
}

/// Short display name for an import target.
///
/// - relative `../utils/helpers.js` from `/p/src/a.js` → `helpers`
/// - `react` → `react`, `lodash/merge` → `lodash`
/// - `@org/utils/helpers` → `@org/utils`
pub fn module_name(from_file: &Path, specifier: &str) -> String {
    if is_path_specifier(specifier) {
        let resolved = resolve_lexically(from_file, specifier);
        return resolved
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    package_name(specifier).to_owned()
}

/// Extract the canonical package name from a bare specifier.
///
/// Scoped packages keep `@scope/name` as one unit; everything after is a subpath.
pub fn package_name(specifier: &str) -> &str {
    if specifier.starts_with('@') {
        let mut parts = specifier.splitn(3, '/');
        match (parts.next(), parts.next()) {
            (Some(scope), Some(name)) => &specifier[..scope.len() + 1 + name.len()],
            _ => specifier,
        }
    } else {
        match specifier.find('/') {
            Some(idx) => &specifier[..idx],
            None => specifier,
        }
    }
}
