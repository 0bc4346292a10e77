use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::resolver::module_name;

use super::syntax::{CommonJsExport, ExportDecl, ModuleItem, RequireBinding};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// The syntactic form of an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import { a, b } from 'm'`
    Named,
    /// `import D from 'm'`
    Default,
    /// `import * as ns from 'm'`
    Namespace,
    /// `import 'm'`
    SideEffect,
    /// `const x = require('m')`
    #[serde(rename = "commonjs")]
    CommonJs,
    /// `const { a, b } = require('m')`
    #[serde(rename = "commonjs_destructured")]
    CommonJsDestructured,
    /// `import('m')`
    Dynamic,
    /// `export { a } from 'm'` / `export * from 'm'`
    ReExport,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Named => "named",
            ImportKind::Default => "default",
            ImportKind::Namespace => "namespace",
            ImportKind::SideEffect => "side_effect",
            ImportKind::CommonJs => "commonjs",
            ImportKind::CommonJsDestructured => "commonjs_destructured",
            ImportKind::Dynamic => "dynamic",
            ImportKind::ReExport => "re_export",
        }
    }
}

/// One import declared by a file. A single statement may produce several
/// records (`import D, { a } from 'm'` yields a Default and a Named record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub source_file: PathBuf,
    /// The specifier exactly as written, e.g. `"./util"` or `"lodash/merge"`.
    pub raw_specifier: String,
    pub kind: ImportKind,
    /// Local names bound by the import. Empty for side-effect and unbound imports.
    pub bound_names: Vec<String>,
    /// Heuristic short module name: file stem for relative specifiers, package
    /// name for bare specifiers.
    pub module_name: String,
}

/// The syntactic form of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    /// `export const a`, `export function f`, `export class C`, TS declarations.
    NamedDeclaration,
    /// `export { a, b as c }`
    NamedList,
    /// `export { a } from 'm'`
    ReExport,
    /// `export * from 'm'`
    ReExportAll,
    /// `export default name`
    Default,
    /// `export default` of an anonymous function, class, or expression.
    DefaultAnonymous,
    /// `export default function name()`
    DefaultFunction,
    /// `export default class Name`
    DefaultClass,
    /// `module.exports = value`
    CommonJsSingle,
    /// `exports.a = ...`
    CommonJsNamed,
    /// `module.exports = { ... }`
    CommonJsObject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    pub source_file: PathBuf,
    pub kind: ExportKind,
    pub names: Vec<String>,
}

/// Everything extracted from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub imports: Vec<ImportRecord>,
    pub exports: Vec<ExportRecord>,
    /// Identifiers rendered as JSX elements with at least one expression-valued
    /// prop. Imports binding one of these names become indirect edges.
    pub prop_targets: BTreeSet<String>,
}

// ---------------------------------------------------------------------------
// Record derivation
// ---------------------------------------------------------------------------

/// Turn lowered module items into import/export records for `path`.
pub fn collect_records(path: &Path, items: &[ModuleItem]) -> Extraction {
    let mut out = Extraction::default();

    for item in items {
        match item {
            ModuleItem::Import(decl) => {
                if !decl.has_clause {
                    push_import(&mut out, path, &decl.specifier, ImportKind::SideEffect, Vec::new());
                    continue;
                }
                if let Some(default) = &decl.default {
                    push_import(&mut out, path, &decl.specifier, ImportKind::Default, vec![default.clone()]);
                }
                if let Some(ns) = &decl.namespace {
                    push_import(&mut out, path, &decl.specifier, ImportKind::Namespace, vec![ns.clone()]);
                }
                // `import {} from 'm'` still records a (bindingless) named import.
                let only_named = decl.default.is_none() && decl.namespace.is_none();
                if !decl.named.is_empty() || only_named {
                    push_import(&mut out, path, &decl.specifier, ImportKind::Named, decl.named.clone());
                }
            }
            ModuleItem::Require { specifier, binding } => {
                let (kind, names) = match binding {
                    RequireBinding::Identifier(name) => (ImportKind::CommonJs, vec![name.clone()]),
                    RequireBinding::Destructured(names) => {
                        (ImportKind::CommonJsDestructured, names.clone())
                    }
                    RequireBinding::Unbound => (ImportKind::CommonJs, Vec::new()),
                };
                push_import(&mut out, path, specifier, kind, names);
            }
            ModuleItem::DynamicImport { specifier } => {
                push_import(&mut out, path, specifier, ImportKind::Dynamic, Vec::new());
            }
            ModuleItem::Export(decl) => collect_export(&mut out, path, decl),
            ModuleItem::CommonJsExport(cjs) => {
                let (kind, names) = match cjs {
                    CommonJsExport::Single(name) => {
                        (ExportKind::CommonJsSingle, name.iter().cloned().collect())
                    }
                    CommonJsExport::Object(keys) => (ExportKind::CommonJsObject, keys.clone()),
                    CommonJsExport::Named(name) => (ExportKind::CommonJsNamed, vec![name.clone()]),
                };
                push_export(&mut out, path, kind, names);
            }
            ModuleItem::JsxUsage {
                component,
                expression_props,
            } => {
                if *expression_props {
                    out.prop_targets.insert(component.clone());
                }
            }
        }
    }

    out
}

fn collect_export(out: &mut Extraction, path: &Path, decl: &ExportDecl) {
    let (kind, names) = match decl {
        ExportDecl::Declaration(names) => (ExportKind::NamedDeclaration, names.clone()),
        ExportDecl::List(names) => (ExportKind::NamedList, names.clone()),
        ExportDecl::ReExport { specifier, names } => {
            push_import(out, path, specifier, ImportKind::ReExport, names.clone());
            (ExportKind::ReExport, names.clone())
        }
        ExportDecl::ReExportAll { specifier, alias } => {
            let names: Vec<String> = alias.iter().cloned().collect();
            push_import(out, path, specifier, ImportKind::ReExport, names.clone());
            (ExportKind::ReExportAll, names)
        }
        ExportDecl::DefaultIdentifier(name) => (ExportKind::Default, vec![name.clone()]),
        ExportDecl::DefaultFunction(Some(name)) => (ExportKind::DefaultFunction, vec![name.clone()]),
        ExportDecl::DefaultClass(Some(name)) => (ExportKind::DefaultClass, vec![name.clone()]),
        ExportDecl::DefaultFunction(None)
        | ExportDecl::DefaultClass(None)
        | ExportDecl::DefaultExpression => (ExportKind::DefaultAnonymous, Vec::new()),
    };
    push_export(out, path, kind, names);
}

fn push_import(out: &mut Extraction, path: &Path, specifier: &str, kind: ImportKind, bound_names: Vec<String>) {
    out.imports.push(ImportRecord {
        source_file: path.to_path_buf(),
        raw_specifier: specifier.to_owned(),
        kind,
        bound_names,
        module_name: module_name(path, specifier),
    });
}

fn push_export(out: &mut Extraction, path: &Path, kind: ExportKind, names: Vec<String>) {
    out.exports.push(ExportRecord {
        source_file: path.to_path_buf(),
        kind,
        names,
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
