//! Symbol set extraction.
//!
//! Walks one parsed translation unit and produces the set of function
//! names relevant to its role: externally visible definitions for a
//! `.c` file, exported declarations for a `.h` file. Duplicates and
//! unresolvable linkage come back as diagnostics next to the set,
//! never instead of it.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::classify::{classify, Classification, EntityKind, Linkage};
use crate::parse::{Location, TopLevelEntity, TranslationUnit};

/// Which side of a module pair a file plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    /// A `.c` translation unit: contributes external definitions.
    Source,
    /// A `.h` header: contributes declarations.
    Header,
}

/// Location info attached to one extracted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolInfo {
    pub location: Location,
}

/// The function names one file contributes to the comparison, each
/// mapped to the location where it was seen first.
///
/// Immutable once built; the comparator reads it without mutation.
#[derive(Debug, Clone)]
pub struct SymbolSet {
    pub file: PathBuf,
    pub role: FileRole,
    symbols: HashMap<String, SymbolInfo>,
}

impl SymbolSet {
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolInfo> {
        self.symbols.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SymbolInfo)> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// A non-fatal finding from extraction.
///
/// Diagnostics accompany whatever comparison can still proceed; the
/// affected symbol keeps its first-seen location (duplicates) or is
/// excluded from both sets (ambiguous linkage).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The same external symbol defined twice in one source file.
    DuplicateDefinition {
        name: String,
        first: Location,
        duplicate: Location,
    },
    /// The same symbol declared twice in one header.
    DuplicateDeclaration {
        name: String,
        first: Location,
        duplicate: Location,
    },
    /// Storage classes the classifier refused to resolve.
    AmbiguousLinkage {
        name: String,
        location: Location,
        reason: String,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateDefinition {
                name,
                first,
                duplicate,
            } => write!(
                f,
                "duplicate external definition of '{name}' at {duplicate} (first at {first})"
            ),
            Self::DuplicateDeclaration {
                name,
                first,
                duplicate,
            } => write!(
                f,
                "duplicate declaration of '{name}' at {duplicate} (first at {first})"
            ),
            Self::AmbiguousLinkage {
                name,
                location,
                reason,
            } => write!(f, "ambiguous linkage for '{name}' at {location}: {reason}"),
        }
    }
}

/// A symbol set plus the diagnostics raised while building it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub set: SymbolSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extract the role-relevant symbol set from a parsed unit.
///
/// For [`FileRole::Source`], keeps externally visible definitions.
/// For [`FileRole::Header`], keeps declarations; `static` declarations
/// in a header are excluded, since headers declare shared interface.
pub fn extract(unit: &TranslationUnit, role: FileRole) -> Extraction {
    let mut symbols: HashMap<String, SymbolInfo> = HashMap::with_capacity(16);
    let mut diagnostics = Vec::new();

    for entity in &unit.entities {
        match classify(entity) {
            Classification::Function { kind, linkage } => {
                let function = match entity.function() {
                    Some(function) => function,
                    None => continue,
                };
                let wanted = match role {
                    FileRole::Source => {
                        kind == EntityKind::Definition && linkage == Linkage::External
                    }
                    FileRole::Header => {
                        kind == EntityKind::Declaration && linkage == Linkage::External
                    }
                };
                if !wanted {
                    continue;
                }

                if let Some(existing) = symbols.get(&function.name) {
                    // First-seen location wins; the recurrence is a
                    // finding of its own.
                    diagnostics.push(match role {
                        FileRole::Source => Diagnostic::DuplicateDefinition {
                            name: function.name.clone(),
                            first: existing.location,
                            duplicate: function.location,
                        },
                        FileRole::Header => Diagnostic::DuplicateDeclaration {
                            name: function.name.clone(),
                            first: existing.location,
                            duplicate: function.location,
                        },
                    });
                } else {
                    symbols.insert(
                        function.name.clone(),
                        SymbolInfo {
                            location: function.location,
                        },
                    );
                }
            }
            Classification::Ambiguous { reason } => {
                if let Some(function) = entity.function() {
                    debug!(
                        file = %unit.path.display(),
                        symbol = %function.name,
                        "excluding entity with ambiguous linkage"
                    );
                    diagnostics.push(Diagnostic::AmbiguousLinkage {
                        name: function.name.clone(),
                        location: function.location,
                        reason,
                    });
                }
            }
            Classification::NotAFunction => {}
        }
    }

    Extraction {
        set: SymbolSet {
            file: unit.path.clone(),
            role,
            symbols,
        },
        diagnostics,
    }
}
