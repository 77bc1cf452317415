//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use ifdrift_core::prelude::*;
//! ```

// Core analysis types
pub use crate::error::{IfdriftError, IfdriftResult};
pub use crate::parse::{Location, TopLevelEntity, TranslationUnit};

// Classification
pub use crate::classify::{classify, Classification, EntityKind, Linkage};

// Extraction and comparison
pub use crate::compare::{compare, DiffResult};
pub use crate::extract::{extract, Diagnostic, Extraction, FileRole, SymbolSet};

// Pair analysis
pub use crate::pair::{analyze_pair, analyze_units, ModulePair, PairAnalysis};

// Batch scanning
pub use crate::scan::{analyze_pairs, gather_module_pairs};

// Configuration
pub use crate::config::{load_config, IfdriftConfig};
