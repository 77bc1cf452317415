//! ifdrift-core: interface drift detection for C header/source pairs
//!
//! This library checks that a C translation unit and its companion
//! header expose the same set of externally visible function symbols:
//! every external function defined in the `.c` file must be declared
//! in the `.h` file, and every declaration in the `.h` file must have
//! a matching definition. The goal is to catch interface drift -
//! functions added, renamed, or removed on one side without a matching
//! update to the other - which a compiler does not correlate across
//! the pair.
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use ifdrift_core::prelude::*;
//!
//! let pair = ModulePair::from_module("src/net/socket")?;
//! let analysis = analyze_pair(&pair)?;
//!
//! for entry in &analysis.diff.missing_from_header {
//!     println!("not declared: {}", entry.name);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`parse`]: C structural parsing via tree-sitter
//! - [`classify`]: linkage classification of top-level entities
//! - [`extract`]: role-specific symbol set extraction
//! - [`compare`]: pure symbol set comparison
//! - [`pair`]: module pairing and per-pair orchestration
//! - [`scan`]: parallel module pair discovery for batch mode
//! - [`config`]: ifdrift.toml loading
//! - [`report`]: plain and JSON rendering
//! - [`error`]: typed error handling
//!
//! Each pair analysis owns all of its intermediate state, so callers
//! can freely run many pairs in parallel; [`scan::analyze_pairs`] does
//! exactly that.

pub mod classify;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pair;
pub mod parse;
pub mod prelude;
pub mod report;
pub mod scan;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{IfdriftError, IfdriftResult, IoResultExt};

// Parsing
pub use parse::{
    parse_file, parse_translation_unit,
    FunctionEntity, Location, TopLevelEntity, TranslationUnit,
};

// Classification
pub use classify::{classify, Classification, EntityKind, Linkage};

// Extraction
pub use extract::{extract, Diagnostic, Extraction, FileRole, SymbolInfo, SymbolSet};

// Comparison
pub use compare::{compare, DiffResult, DriftEntry, MatchedEntry};

// Pair analysis
pub use pair::{analyze_pair, analyze_units, ModulePair, PairAnalysis};

// Batch scanning
pub use scan::{analyze_pairs, analyze_pairs_strict, gather_module_pairs};

// Configuration
pub use config::{load_config, IfdriftConfig, OutputConfig};

// Logging
pub use logging::init_structured_logging;

// Reporting
pub use report::{print_json, print_plain, render_plain, to_json};
