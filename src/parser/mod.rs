pub mod imports;
pub mod syntax;

use std::cell::RefCell;
use std::path::Path;

use tree_sitter::{Parser, Tree};

use crate::error::ExtractError;
use crate::language::SourceLanguage;

pub use imports::{ExportKind, ExportRecord, Extraction, ImportKind, ImportRecord};

// Thread-local Parser instances: one per rayon worker thread, no lock contention.
// Each Parser is initialised once per thread with the appropriate grammar.
thread_local! {
    static PARSER_TS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .expect("typescript grammar matches the linked tree-sitter ABI");
        p
    });
    static PARSER_TSX: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .expect("tsx grammar matches the linked tree-sitter ABI");
        p
    });
    static PARSER_JS: RefCell<Parser> = RefCell::new({
        let mut p = Parser::new();
        p.set_language(&tree_sitter_javascript::LANGUAGE.into())
            .expect("javascript grammar matches the linked tree-sitter ABI");
        p
    });
}

/// Parse `text` with the grammar for `language`.
///
/// tree-sitter is error-tolerant: broken syntax yields a tree with `ERROR`
/// nodes, not a failure. `Err` only comes back for files that are never parsed
/// (JSON) or when the parser gives up entirely.
pub fn parse_tree(language: SourceLanguage, path: &Path, text: &str) -> Result<Tree, ExtractError> {
    let tree = match language {
        SourceLanguage::JavaScript => PARSER_JS.with(|p| p.borrow_mut().parse(text, None)),
        SourceLanguage::TypeScript => PARSER_TS.with(|p| p.borrow_mut().parse(text, None)),
        SourceLanguage::Tsx => PARSER_TSX.with(|p| p.borrow_mut().parse(text, None)),
        SourceLanguage::Json => return Err(ExtractError::UnsupportedLanguage(path.to_path_buf())),
    };
    tree.ok_or_else(|| ExtractError::Parse(path.to_path_buf()))
}

/// Extract imports, exports, and prop-flow targets from one file.
///
/// Pure function of `(path, text)`: the path only selects the grammar and
/// feeds the module-name heuristic; the filesystem is never touched.
///
/// # Errors
/// - the extension is not a JavaScript/TypeScript/JSON extension
/// - tree-sitter returns no tree
pub fn try_extract(path: &Path, text: &str) -> Result<Extraction, ExtractError> {
    let language = SourceLanguage::from_path(path)
        .ok_or_else(|| ExtractError::UnsupportedLanguage(path.to_path_buf()))?;
    if !language.is_parsed() {
        return Ok(Extraction::default());
    }

    let tree = parse_tree(language, path, text)?;
    let items = syntax::lower(&tree, text);
    Ok(imports::collect_records(path, &items))
}

/// Best-effort variant of [`try_extract`]: any failure becomes an empty extraction.
pub fn extract(path: &Path, text: &str) -> Extraction {
    try_extract(path, text).unwrap_or_default()
}
