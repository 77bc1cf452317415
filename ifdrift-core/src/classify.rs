//! Linkage classification for top-level entities.
//!
//! Decides, for one parsed entity, whether it is a function definition
//! or declaration and whether the name has external linkage. Storage
//! classes the classifier cannot confidently resolve are reported as
//! ambiguous rather than guessed into either symbol set.

use crate::parse::TopLevelEntity;

/// Whether a function entity has a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Definition,
    Declaration,
}

/// Link-time visibility of a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Visible to other translation units (no `static`).
    External,
    /// Visible only within its own translation unit.
    Internal,
}

/// Result of classifying one top-level entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Function { kind: EntityKind, linkage: Linkage },
    NotAFunction,
    /// Storage-class combination the classifier does not resolve;
    /// the entity belongs in neither symbol set.
    Ambiguous { reason: String },
}

/// Classify a top-level entity.
///
/// Rules:
/// - a body makes it a definition, a prototype a declaration;
/// - `static` means internal linkage regardless of body presence
///   (including `static inline`);
/// - no storage class or explicit `extern` means external linkage;
/// - a plain `inline` definition provides no external definition and
///   is treated as internal; an `inline` prototype stays external;
/// - `static` combined with `extern`, or specifiers that do not apply
///   to functions (`auto`, `register`, thread-local forms), come back
///   as [`Classification::Ambiguous`].
pub fn classify(entity: &TopLevelEntity) -> Classification {
    let (kind, function) = match entity {
        TopLevelEntity::FunctionDefinition(f) => (EntityKind::Definition, f),
        TopLevelEntity::FunctionDeclaration(f) => (EntityKind::Declaration, f),
        TopLevelEntity::Other => return Classification::NotAFunction,
    };

    let mut has_static = false;
    let mut has_extern = false;
    let mut has_inline = false;

    for specifier in &function.storage {
        match specifier.as_str() {
            "static" => has_static = true,
            "extern" => has_extern = true,
            "inline" | "__inline" | "__inline__" => has_inline = true,
            "auto" | "register" | "thread_local" | "_Thread_local" | "__thread" => {
                return Classification::Ambiguous {
                    reason: format!("'{specifier}' storage class on a function"),
                };
            }
            other => {
                return Classification::Ambiguous {
                    reason: format!("unrecognized storage class '{other}'"),
                };
            }
        }
    }

    if has_static && has_extern {
        return Classification::Ambiguous {
            reason: "both 'static' and 'extern' specified".to_string(),
        };
    }

    let linkage = if has_static {
        Linkage::Internal
    } else if has_extern {
        Linkage::External
    } else if has_inline && kind == EntityKind::Definition {
        // C99 6.7.4: an inline definition without extern does not
        // provide an external definition.
        Linkage::Internal
    } else {
        Linkage::External
    };

    Classification::Function { kind, linkage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{FunctionEntity, Location};

    fn entity(storage: &[&str], has_body: bool) -> TopLevelEntity {
        let function = FunctionEntity {
            name: "f".to_string(),
            storage: storage.iter().map(|s| s.to_string()).collect(),
            location: Location { line: 1, column: 1 },
        };
        if has_body {
            TopLevelEntity::FunctionDefinition(function)
        } else {
            TopLevelEntity::FunctionDeclaration(function)
        }
    }

    #[test]
    fn test_plain_definition_is_external() {
        assert_eq!(
            classify(&entity(&[], true)),
            Classification::Function {
                kind: EntityKind::Definition,
                linkage: Linkage::External,
            }
        );
    }

    #[test]
    fn test_static_definition_is_internal() {
        assert_eq!(
            classify(&entity(&["static"], true)),
            Classification::Function {
                kind: EntityKind::Definition,
                linkage: Linkage::Internal,
            }
        );
    }

    #[test]
    fn test_static_declaration_is_internal() {
        // Forward declarations of private helpers in a .c file.
        assert_eq!(
            classify(&entity(&["static"], false)),
            Classification::Function {
                kind: EntityKind::Declaration,
                linkage: Linkage::Internal,
            }
        );
    }

    #[test]
    fn test_extern_declaration_is_external() {
        assert_eq!(
            classify(&entity(&["extern"], false)),
            Classification::Function {
                kind: EntityKind::Declaration,
                linkage: Linkage::External,
            }
        );
    }

    #[test]
    fn test_static_inline_is_internal() {
        assert_eq!(
            classify(&entity(&["static", "inline"], true)),
            Classification::Function {
                kind: EntityKind::Definition,
                linkage: Linkage::Internal,
            }
        );
    }

    #[test]
    fn test_plain_inline_definition_is_internal() {
        assert_eq!(
            classify(&entity(&["inline"], true)),
            Classification::Function {
                kind: EntityKind::Definition,
                linkage: Linkage::Internal,
            }
        );
    }

    #[test]
    fn test_inline_prototype_stays_external() {
        assert_eq!(
            classify(&entity(&["inline"], false)),
            Classification::Function {
                kind: EntityKind::Declaration,
                linkage: Linkage::External,
            }
        );
    }

    #[test]
    fn test_extern_inline_definition_is_external() {
        assert_eq!(
            classify(&entity(&["extern", "inline"], true)),
            Classification::Function {
                kind: EntityKind::Definition,
                linkage: Linkage::External,
            }
        );
    }

    #[test]
    fn test_static_extern_is_ambiguous() {
        assert!(matches!(
            classify(&entity(&["static", "extern"], false)),
            Classification::Ambiguous { .. }
        ));
    }

    #[test]
    fn test_register_on_function_is_ambiguous() {
        assert!(matches!(
            classify(&entity(&["register"], false)),
            Classification::Ambiguous { .. }
        ));
    }

    #[test]
    fn test_unknown_specifier_is_ambiguous() {
        let result = classify(&entity(&["__declspec"], false));
        match result {
            Classification::Ambiguous { reason } => assert!(reason.contains("__declspec")),
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_other_is_not_a_function() {
        assert_eq!(classify(&TopLevelEntity::Other), Classification::NotAFunction);
    }
}
