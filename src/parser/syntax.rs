use tree_sitter::{Node, Tree};

// ---------------------------------------------------------------------------
// Typed module items
// ---------------------------------------------------------------------------

/// A module-level construct relevant to dependency tracing, lowered from the
/// tree-sitter syntax tree.
///
/// Record extraction matches exhaustively over this enum instead of
/// re-inspecting raw node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleItem {
    /// `import ... from 'm'` or `import 'm'`.
    Import(ImportDecl),
    /// `require('m')`, optionally bound by a variable declarator, or TS `import x = require('m')`.
    Require {
        specifier: String,
        binding: RequireBinding,
    },
    /// `import('m')`.
    DynamicImport { specifier: String },
    /// Any `export ...` statement.
    Export(ExportDecl),
    /// An assignment to `module.exports` or one of its properties.
    CommonJsExport(CommonJsExport),
    /// A JSX element whose tag is a plain identifier.
    JsxUsage {
        component: String,
        /// At least one attribute has an expression value (`prop={...}`).
        expression_props: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportDecl {
    pub specifier: String,
    pub default: Option<String>,
    pub namespace: Option<String>,
    /// Local binding names of `{ a, b as c }` (here `a`, `c`).
    pub named: Vec<String>,
    /// False for side-effect imports (`import './polyfill'`).
    pub has_clause: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequireBinding {
    /// `const x = require('m')`
    Identifier(String),
    /// `const { a, b: c } = require('m')`
    Destructured(Vec<String>),
    /// `require('m')` used as an expression statement or argument.
    Unbound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportDecl {
    /// `export const a = ...`, `export function f() {}`, `export class C {}`, TS declarations.
    Declaration(Vec<String>),
    /// `export { a, b as c }` (public names `a`, `c`).
    List(Vec<String>),
    /// `export { a } from 'm'`
    ReExport { specifier: String, names: Vec<String> },
    /// `export * from 'm'` / `export * as ns from 'm'`
    ReExportAll {
        specifier: String,
        alias: Option<String>,
    },
    /// `export default name`
    DefaultIdentifier(String),
    /// `export default function [name]() {}`
    DefaultFunction(Option<String>),
    /// `export default class [Name] {}`
    DefaultClass(Option<String>),
    /// `export default <any other expression>`
    DefaultExpression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonJsExport {
    /// `module.exports = value`; the name is present when the value is an identifier.
    Single(Option<String>),
    /// `module.exports = { a, b: c }` (keys `a`, `b`).
    Object(Vec<String>),
    /// `exports.a = ...` or `module.exports.a = ...`
    Named(String),
}

// ---------------------------------------------------------------------------
// Lowering
// ---------------------------------------------------------------------------

/// Walk the whole tree in source order and lower every relevant node.
///
/// Uses an explicit stack so deeply nested sources cannot exhaust the call stack.
pub fn lower(tree: &Tree, source: &str) -> Vec<ModuleItem> {
    let src = source.as_bytes();
    let mut items = Vec::new();
    let mut stack = vec![tree.root_node()];

    while let Some(node) = stack.pop() {
        if let Some(item) = lower_node(node, src) {
            items.push(item);
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    items
}

fn lower_node(node: Node, src: &[u8]) -> Option<ModuleItem> {
    match node.kind() {
        "import_statement" => lower_import(node, src),
        "export_statement" => lower_export(node, src).map(ModuleItem::Export),
        "call_expression" => lower_call(node, src),
        "assignment_expression" => lower_assignment(node, src).map(ModuleItem::CommonJsExport),
        "jsx_opening_element" | "jsx_self_closing_element" => lower_jsx(node, src),
        _ => None,
    }
}

fn lower_import(node: Node, src: &[u8]) -> Option<ModuleItem> {
    let mut decl = ImportDecl::default();

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_clause" => {
                decl.has_clause = true;
                lower_import_clause(child, src, &mut decl);
            }
            "import_require_clause" => {
                // TS: `import fs = require('fs')`
                let binding = first_named_of_kind(child, "identifier")
                    .map(|n| RequireBinding::Identifier(node_text(n, src).to_owned()))
                    .unwrap_or(RequireBinding::Unbound);
                let specifier = string_value(child.child_by_field_name("source")?, src);
                return Some(ModuleItem::Require { specifier, binding });
            }
            _ => {}
        }
    }

    decl.specifier = string_value(node.child_by_field_name("source")?, src);
    Some(ModuleItem::Import(decl))
}

fn lower_import_clause(clause: Node, src: &[u8], decl: &mut ImportDecl) {
    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            "identifier" => decl.default = Some(node_text(child, src).to_owned()),
            "namespace_import" => {
                decl.namespace =
                    first_named_of_kind(child, "identifier").map(|n| node_text(n, src).to_owned());
            }
            "named_imports" => {
                let mut inner = child.walk();
                for spec in child.named_children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    // In `{ foo as bar }` the local binding is the alias.
                    let local = spec
                        .child_by_field_name("alias")
                        .or_else(|| spec.child_by_field_name("name"));
                    if let Some(n) = local {
                        decl.named.push(node_text(n, src).to_owned());
                    }
                }
            }
            _ => {}
        }
    }
}

fn lower_export(node: Node, src: &[u8]) -> Option<ExportDecl> {
    let mut is_default = false;
    let mut has_star = false;
    let mut clause = None;
    let mut namespace_alias = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "default" => is_default = true,
            "*" => has_star = true,
            "export_clause" => clause = Some(child),
            "namespace_export" => {
                has_star = true;
                namespace_alias =
                    first_named_of_kind(child, "identifier").map(|n| node_text(n, src).to_owned());
            }
            _ => {}
        }
    }

    let source = node.child_by_field_name("source").map(|s| string_value(s, src));

    if has_star {
        return Some(ExportDecl::ReExportAll {
            specifier: source?,
            alias: namespace_alias,
        });
    }

    if let Some(clause) = clause {
        return Some(match source {
            Some(specifier) => ExportDecl::ReExport {
                specifier,
                names: export_clause_names(clause, src, false),
            },
            None => ExportDecl::List(export_clause_names(clause, src, true)),
        });
    }

    if is_default {
        return Some(lower_default_export(node, src));
    }

    node.child_by_field_name("declaration")
        .map(|decl| ExportDecl::Declaration(declaration_names(decl, src)))
}

fn lower_default_export(node: Node, src: &[u8]) -> ExportDecl {
    if let Some(decl) = node.child_by_field_name("declaration") {
        let name = decl
            .child_by_field_name("name")
            .map(|n| node_text(n, src).to_owned());
        return match decl.kind() {
            "function_declaration" | "generator_function_declaration" => {
                ExportDecl::DefaultFunction(name)
            }
            "class_declaration" | "abstract_class_declaration" => ExportDecl::DefaultClass(name),
            // TS: `export default interface Props {}`
            "interface_declaration" => match name {
                Some(name) => ExportDecl::DefaultIdentifier(name),
                None => ExportDecl::DefaultExpression,
            },
            _ => ExportDecl::DefaultExpression,
        };
    }

    let Some(value) = node.child_by_field_name("value") else {
        return ExportDecl::DefaultExpression;
    };
    let name = value
        .child_by_field_name("name")
        .map(|n| node_text(n, src).to_owned());
    match value.kind() {
        "identifier" => ExportDecl::DefaultIdentifier(node_text(value, src).to_owned()),
        "function_expression" | "function" | "generator_function" => {
            ExportDecl::DefaultFunction(name)
        }
        "class" => ExportDecl::DefaultClass(name),
        _ => ExportDecl::DefaultExpression,
    }
}

/// Names listed in an `export { ... }` clause.
///
/// `public` selects the exported (aliased) name; otherwise the original name is
/// returned, which is what a re-export pulls from its source module.
fn export_clause_names(clause: Node, src: &[u8], public: bool) -> Vec<String> {
    let mut names = Vec::new();
    let mut cursor = clause.walk();
    for spec in clause.named_children(&mut cursor) {
        if spec.kind() != "export_specifier" {
            continue;
        }
        let chosen = if public {
            spec.child_by_field_name("alias")
                .or_else(|| spec.child_by_field_name("name"))
        } else {
            spec.child_by_field_name("name")
        };
        if let Some(n) = chosen {
            names.push(node_text(n, src).to_owned());
        }
    }
    names
}

fn declaration_names(decl: Node, src: &[u8]) -> Vec<String> {
    let mut names = Vec::new();
    match decl.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for declarator in decl.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator.child_by_field_name("name") {
                    pattern_names(name, src, &mut names);
                }
            }
        }
        "ambient_declaration" => {
            let mut cursor = decl.walk();
            if let Some(inner) = decl.named_children(&mut cursor).next() {
                names.extend(declaration_names(inner, src));
            }
        }
        _ => {
            if let Some(n) = decl.child_by_field_name("name") {
                names.push(node_text(n, src).to_owned());
            }
        }
    }
    names
}

/// Collect the identifiers bound by a declarator pattern.
fn pattern_names(node: Node, src: &[u8], out: &mut Vec<String>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            out.push(node_text(node, src).to_owned());
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                pattern_names(value, src, out);
            }
        }
        "object_assignment_pattern" | "assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                pattern_names(left, src, out);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                pattern_names(child, src, out);
            }
        }
        _ => {}
    }
}

fn lower_call(node: Node, src: &[u8]) -> Option<ModuleItem> {
    let function = node.child_by_field_name("function")?;
    let arguments = node.child_by_field_name("arguments")?;

    let mut cursor = arguments.walk();
    let first = arguments.named_children(&mut cursor).next()?;
    if first.kind() != "string" {
        return None;
    }
    let specifier = string_value(first, src);

    match function.kind() {
        "import" => Some(ModuleItem::DynamicImport { specifier }),
        "identifier" if node_text(function, src) == "require" => Some(ModuleItem::Require {
            specifier,
            binding: require_binding(node, src),
        }),
        _ => None,
    }
}

/// The binding of a `require(...)` call, when the call is the whole initialiser
/// of a variable declarator.
fn require_binding(call: Node, src: &[u8]) -> RequireBinding {
    let Some(parent) = call.parent() else {
        return RequireBinding::Unbound;
    };
    if parent.kind() != "variable_declarator" {
        return RequireBinding::Unbound;
    }
    let is_value = parent
        .child_by_field_name("value")
        .is_some_and(|v| v.id() == call.id());
    if !is_value {
        return RequireBinding::Unbound;
    }
    match parent.child_by_field_name("name") {
        Some(name) if name.kind() == "identifier" => {
            RequireBinding::Identifier(node_text(name, src).to_owned())
        }
        Some(name) if name.kind() == "object_pattern" => {
            let mut names = Vec::new();
            pattern_names(name, src, &mut names);
            RequireBinding::Destructured(names)
        }
        _ => RequireBinding::Unbound,
    }
}

fn lower_assignment(node: Node, src: &[u8]) -> Option<CommonJsExport> {
    let left = node.child_by_field_name("left")?;
    let right = node.child_by_field_name("right")?;
    if left.kind() != "member_expression" {
        return None;
    }

    if is_module_exports(left, src) {
        return Some(match right.kind() {
            "identifier" => CommonJsExport::Single(Some(node_text(right, src).to_owned())),
            "object" => CommonJsExport::Object(object_keys(right, src)),
            _ => CommonJsExport::Single(None),
        });
    }

    let object = left.child_by_field_name("object")?;
    let property = left.child_by_field_name("property")?;
    let targets_exports = (object.kind() == "identifier" && node_text(object, src) == "exports")
        || is_module_exports(object, src);
    targets_exports.then(|| CommonJsExport::Named(node_text(property, src).to_owned()))
}

fn is_module_exports(node: Node, src: &[u8]) -> bool {
    if node.kind() != "member_expression" {
        return false;
    }
    let object = node.child_by_field_name("object");
    let property = node.child_by_field_name("property");
    matches!(
        (object, property),
        (Some(o), Some(p)) if o.kind() == "identifier"
            && node_text(o, src) == "module"
            && node_text(p, src) == "exports"
    )
}

fn object_keys(object: Node, src: &[u8]) -> Vec<String> {
    let mut keys = Vec::new();
    let mut cursor = object.walk();
    for child in object.named_children(&mut cursor) {
        match child.kind() {
            "shorthand_property_identifier" => keys.push(node_text(child, src).to_owned()),
            "pair" => {
                if let Some(key) = child.child_by_field_name("key") {
                    match key.kind() {
                        "string" => keys.push(string_value(key, src)),
                        "computed_property_name" => {}
                        _ => keys.push(node_text(key, src).to_owned()),
                    }
                }
            }
            "method_definition" => {
                if let Some(name) = child.child_by_field_name("name") {
                    keys.push(node_text(name, src).to_owned());
                }
            }
            _ => {}
        }
    }
    keys
}

fn lower_jsx(node: Node, src: &[u8]) -> Option<ModuleItem> {
    // `<UI.Card />` is attributed to the binding it hangs off: `UI`.
    let mut name = node.child_by_field_name("name")?;
    while matches!(name.kind(), "member_expression" | "nested_identifier") {
        name = name
            .child_by_field_name("object")
            .or_else(|| name.named_child(0))?;
    }
    if name.kind() != "identifier" {
        return None;
    }

    let mut cursor = node.walk();
    let expression_props = node
        .named_children(&mut cursor)
        .filter(|attr| attr.kind() == "jsx_attribute")
        .any(|attr| first_named_of_kind(attr, "jsx_expression").is_some());

    Some(ModuleItem::JsxUsage {
        component: node_text(name, src).to_owned(),
        expression_props,
    })
}

// ---------------------------------------------------------------------------
// Helper utilities
// ---------------------------------------------------------------------------

fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

fn first_named_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).find(|c| c.kind() == kind)
}

/// The contents of a string literal node without its quotes.
fn string_value(string_node: Node, src: &[u8]) -> String {
    let mut cursor = string_node.walk();
    string_node
        .named_children(&mut cursor)
        .map(|part| node_text(part, src))
        .collect()
}
