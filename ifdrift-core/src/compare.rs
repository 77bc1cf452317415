//! Symbol set comparison.
//!
//! A pure two-set diff by name: which external definitions lack a
//! declaration, which declarations lack a definition, and which names
//! line up. Result sets are unordered; presentation ordering belongs
//! to the report layer.

use serde::Serialize;

use crate::extract::SymbolSet;
use crate::parse::Location;

/// A symbol present on only one side of the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftEntry {
    pub name: String,
    pub location: Location,
}

/// A symbol present on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedEntry {
    pub name: String,
    pub source_location: Location,
    pub header_location: Location,
}

/// The structured outcome of comparing one source set against one
/// header set.
///
/// The three sets partition the union of the input names: every name
/// appears in exactly one of them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffResult {
    /// External definitions in the `.c` file with no declaration in
    /// the `.h` file.
    pub missing_from_header: Vec<DriftEntry>,
    /// Declarations in the `.h` file with no externally visible
    /// definition in the `.c` file.
    pub missing_from_source: Vec<DriftEntry>,
    /// Names present on both sides.
    pub matched: Vec<MatchedEntry>,
}

impl DiffResult {
    /// No drift in either direction.
    pub fn is_clean(&self) -> bool {
        self.missing_from_header.is_empty() && self.missing_from_source.is_empty()
    }

    /// Total number of drifted symbols.
    pub fn drift_count(&self) -> usize {
        self.missing_from_header.len() + self.missing_from_source.len()
    }
}

/// Compare the extracted sets of a module pair.
///
/// Pure function of its two inputs: no I/O, no mutation, total over
/// any pair of valid sets.
pub fn compare(source: &SymbolSet, header: &SymbolSet) -> DiffResult {
    let mut result = DiffResult::default();

    for (name, info) in source.iter() {
        match header.get(name) {
            Some(header_info) => result.matched.push(MatchedEntry {
                name: name.clone(),
                source_location: info.location,
                header_location: header_info.location,
            }),
            None => result.missing_from_header.push(DriftEntry {
                name: name.clone(),
                location: info.location,
            }),
        }
    }

    for (name, info) in header.iter() {
        if !source.contains(name) {
            result.missing_from_source.push(DriftEntry {
                name: name.clone(),
                location: info.location,
            });
        }
    }

    result
}
