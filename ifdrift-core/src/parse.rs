//! C structural parsing built on tree-sitter.
//!
//! Turns one file's source text into a flat sequence of top-level
//! entities carrying name, storage-class specifiers, and location.
//! Linkage decisions happen later in [`crate::classify`]; this module
//! only reports what the grammar sees.
//!
//! Conditional-compilation blocks are not resolved here: entities from
//! every `#if`/`#ifdef` branch are collected, and picking a single
//! preprocessor configuration stays the caller's concern.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tree_sitter::Node;

use crate::error::{IfdriftError, IfdriftResult, IoResultExt};

/// Maximum file size to parse (10 MB).
/// Files larger than this are rejected to prevent memory issues.
const MAX_FILE_SIZE: usize = 10_000_000;

// Thread-local parser reuse - avoids creating a new parser per file
thread_local! {
    static C_PARSER: RefCell<tree_sitter::Parser> = RefCell::new({
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_c::LANGUAGE.into())
            .expect("tree-sitter-c grammar incompatible with tree-sitter version");
        parser
    });
}

/// A source position, 1-indexed for both line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A function found at file scope: its identifier, the storage-class
/// specifiers attached to the enclosing declaration/definition, and
/// where the identifier appears.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntity {
    pub name: String,
    /// Raw storage-class specifier spellings, in source order
    /// (e.g. `["static", "inline"]`).
    pub storage: Vec<String>,
    pub location: Location,
}

/// One item at file scope.
///
/// An explicit sum type so downstream passes match exhaustively; a new
/// entity kind cannot be silently misclassified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopLevelEntity {
    /// A function with a body.
    FunctionDefinition(FunctionEntity),
    /// A function prototype (no body).
    FunctionDeclaration(FunctionEntity),
    /// Any other file-scope item: variables, types, function pointer
    /// objects, typedefs.
    Other,
}

impl TopLevelEntity {
    /// The function payload, if this entity is function-related.
    pub fn function(&self) -> Option<&FunctionEntity> {
        match self {
            Self::FunctionDefinition(f) | Self::FunctionDeclaration(f) => Some(f),
            Self::Other => None,
        }
    }
}

/// The parsed representation of one source file.
///
/// Created per parse call, owned by the caller, discarded after
/// extraction.
#[derive(Debug, Clone)]
pub struct TranslationUnit {
    pub path: PathBuf,
    /// Top-level entities in source order.
    pub entities: Vec<TopLevelEntity>,
}

/// Parses C source text into a [`TranslationUnit`].
///
/// A tree containing syntax errors aborts with `IfdriftError::Parse`
/// carrying the first error location; extraction never runs on a
/// malformed unit.
pub fn parse_translation_unit(path: &Path, source: &str) -> IfdriftResult<TranslationUnit> {
    if source.len() > MAX_FILE_SIZE {
        return Err(IfdriftError::parse(
            path,
            format!("file too large ({} bytes, max {})", source.len(), MAX_FILE_SIZE),
        ));
    }

    let tree = C_PARSER.with(|parser| parser.borrow_mut().parse(source, None));
    let tree = match tree {
        Some(tree) => tree,
        None => return Err(IfdriftError::parse(path, "parser returned no tree")),
    };

    let root = tree.root_node();
    if root.has_error() {
        let loc = Location::from_point(first_error_point(root));
        return Err(IfdriftError::parse_at(
            path,
            "C syntax error",
            loc.line,
            loc.column,
        ));
    }

    let mut entities = Vec::with_capacity(16);
    collect_entities(root, source.as_bytes(), &mut entities);

    Ok(TranslationUnit {
        path: path.to_path_buf(),
        entities,
    })
}

/// Reads and parses one file.
pub fn parse_file(path: &Path) -> IfdriftResult<TranslationUnit> {
    let source = std::fs::read_to_string(path).with_path(path)?;
    parse_translation_unit(path, &source)
}

/// Locate the first ERROR or MISSING node in a broken tree.
fn first_error_point(node: Node) -> tree_sitter::Point {
    if node.is_error() || node.is_missing() {
        return node.start_position();
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.has_error() || child.is_missing() {
                return first_error_point(child);
            }
        }
    }
    node.start_position()
}

/// Walk the named children of a container node, dispatching each
/// file-scope item.
fn collect_entities(node: Node, source: &[u8], entities: &mut Vec<TopLevelEntity>) {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            dispatch(child, source, entities);
        }
    }
}

fn dispatch(node: Node, source: &[u8], entities: &mut Vec<TopLevelEntity>) {
    match node.kind() {
        "function_definition" => {
            entities.push(definition_entity(node, source));
        }
        "declaration" => {
            declaration_entities(node, source, entities);
        }
        // Conditional-compilation regions keep their branches in the
        // tree; collect entities from all of them.
        "preproc_ifdef" | "preproc_if" | "preproc_else" | "preproc_elif" | "preproc_elifdef" => {
            collect_entities(node, source, entities);
        }
        // extern "C" { ... } wrapper, common in headers.
        "linkage_specification" => {
            if let Some(body) = node.child_by_field_name("body") {
                if body.kind() == "declaration_list" {
                    collect_entities(body, source, entities);
                } else {
                    dispatch(body, source, entities);
                }
            }
        }
        "declaration_list" => {
            collect_entities(node, source, entities);
        }
        "type_definition" | "struct_specifier" | "union_specifier" | "enum_specifier" => {
            entities.push(TopLevelEntity::Other);
        }
        _ => {}
    }
}

/// Build an entity from a `function_definition` node.
fn definition_entity(node: Node, source: &[u8]) -> TopLevelEntity {
    let ident = node
        .child_by_field_name("declarator")
        .and_then(declared_identifier);
    match ident {
        Some(ident) => {
            let name = match ident.utf8_text(source) {
                Ok(name) => name.to_string(),
                Err(_) => return TopLevelEntity::Other,
            };
            TopLevelEntity::FunctionDefinition(FunctionEntity {
                name,
                storage: storage_specifiers(node, source),
                location: Location::from_point(ident.start_position()),
            })
        }
        // Old-style definitions the declarator walk cannot name.
        None => TopLevelEntity::Other,
    }
}

/// Build entities from a `declaration` node.
///
/// One declaration may declare several names (`int f(void), g(void);`);
/// each function declarator yields its own entity. Typedefs never
/// declare functions, whatever their declarator shape.
fn declaration_entities(node: Node, source: &[u8], entities: &mut Vec<TopLevelEntity>) {
    let storage = storage_specifiers(node, source);
    if storage.iter().any(|s| s == "typedef") {
        entities.push(TopLevelEntity::Other);
        return;
    }

    let mut cursor = node.walk();
    let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
    if declarators.is_empty() {
        // Bare specifier declarations (`struct point;`).
        entities.push(TopLevelEntity::Other);
        return;
    }

    for declarator in declarators {
        let declarator = if declarator.kind() == "init_declarator" {
            match declarator.child_by_field_name("declarator") {
                Some(inner) => inner,
                None => {
                    entities.push(TopLevelEntity::Other);
                    continue;
                }
            }
        } else {
            declarator
        };

        match declared_identifier(declarator) {
            Some(ident) if names_function(&ident) => {
                let name = match ident.utf8_text(source) {
                    Ok(name) => name.to_string(),
                    Err(_) => {
                        entities.push(TopLevelEntity::Other);
                        continue;
                    }
                };
                entities.push(TopLevelEntity::FunctionDeclaration(FunctionEntity {
                    name,
                    storage: storage.clone(),
                    location: Location::from_point(ident.start_position()),
                }));
            }
            _ => entities.push(TopLevelEntity::Other),
        }
    }
}

/// Collect the raw storage-class specifier spellings on a
/// declaration/definition node.
fn storage_specifiers(node: Node, source: &[u8]) -> Vec<String> {
    let mut specifiers = Vec::new();
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if child.kind() == "storage_class_specifier" {
                if let Ok(text) = child.utf8_text(source) {
                    specifiers.push(text.to_string());
                }
            }
        }
    }
    specifiers
}

/// Descend through a declarator to the identifier being declared
/// (handles pointers, arrays, parentheses, function declarators).
fn declared_identifier(node: Node) -> Option<Node> {
    match node.kind() {
        "identifier" => Some(node),
        "function_declarator" | "pointer_declarator" | "array_declarator" | "init_declarator" => {
            node.child_by_field_name("declarator")
                .and_then(declared_identifier)
        }
        "parenthesized_declarator" => {
            for i in 0..node.named_child_count() {
                if let Some(found) = node.named_child(i).and_then(declared_identifier) {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}

/// Whether a declared identifier names a function, as opposed to an
/// object.
///
/// The identifier's innermost enclosing declarator decides:
/// `int *f(int)` puts `f` directly under a function declarator, while
/// `int (*cb)(int)` puts `cb` under a pointer declarator - `cb` is a
/// function pointer object, not a function.
fn names_function(ident: &Node) -> bool {
    let mut current = *ident;
    while let Some(parent) = current.parent() {
        match parent.kind() {
            "parenthesized_declarator" => current = parent,
            "function_declarator" => return true,
            _ => return false,
        }
    }
    false
}
