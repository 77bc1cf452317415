//! Module pairing and per-pair analysis.
//!
//! A module is a `.c` translation unit checked against its companion
//! `.h` header. Pairs are formed from a module stem (`net/socket` ->
//! `net/socket.c` + `net/socket.h`) or from two explicit paths; each
//! analysis is an independent parse-extract-compare pass owning all of
//! its intermediate state.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::compare::{compare, DiffResult};
use crate::error::{IfdriftError, IfdriftResult};
use crate::extract::{extract, Diagnostic, FileRole};
use crate::parse::{parse_file, TranslationUnit};

/// A `.c`/`.h` file pair under one module name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePair {
    /// Module stem used in reports (file path without extension).
    pub name: String,
    pub source: PathBuf,
    pub header: PathBuf,
}

impl ModulePair {
    /// Form a pair from a module stem by appending `.c` and `.h`.
    ///
    /// Both files must exist; the error names whichever side is
    /// missing.
    pub fn from_module(stem: impl AsRef<Path>) -> IfdriftResult<Self> {
        let stem = stem.as_ref();
        let name = stem.display().to_string();
        // Plain suffix append: a stem like `lib.posix` must not lose
        // its dotted part to an extension swap.
        let source = PathBuf::from(format!("{name}.c"));
        let header = PathBuf::from(format!("{name}.h"));

        if !source.exists() {
            return Err(IfdriftError::pair(
                &name,
                format!("missing '{}'", source.display()),
            ));
        }
        if !header.exists() {
            return Err(IfdriftError::pair(
                &name,
                format!("missing '{}'", header.display()),
            ));
        }

        Ok(Self {
            name,
            source,
            header,
        })
    }

    /// Form a pair from two explicit file paths.
    pub fn explicit(source: impl Into<PathBuf>, header: impl Into<PathBuf>) -> Self {
        let source = source.into();
        let name = source
            .with_extension("")
            .display()
            .to_string();
        Self {
            name,
            source,
            header: header.into(),
        }
    }
}

/// Everything one pair analysis produced: the diff plus the
/// diagnostics raised while extracting either side.
#[derive(Debug, Clone)]
pub struct PairAnalysis {
    pub pair: ModulePair,
    pub diff: DiffResult,
    pub diagnostics: Vec<Diagnostic>,
}

impl PairAnalysis {
    /// No drift in either direction (diagnostics may still exist).
    pub fn is_clean(&self) -> bool {
        self.diff.is_clean()
    }
}

/// Compare two already-parsed units tagged by role.
///
/// This is the core entry point for callers that integrate their own
/// file handling: no I/O happens here.
pub fn analyze_units(
    source_unit: &TranslationUnit,
    header_unit: &TranslationUnit,
) -> (DiffResult, Vec<Diagnostic>) {
    let source_extraction = extract(source_unit, FileRole::Source);
    let header_extraction = extract(header_unit, FileRole::Header);

    let diff = compare(&source_extraction.set, &header_extraction.set);

    let mut diagnostics = source_extraction.diagnostics;
    diagnostics.extend(header_extraction.diagnostics);

    (diff, diagnostics)
}

/// Read, parse, and compare one module pair.
pub fn analyze_pair(pair: &ModulePair) -> IfdriftResult<PairAnalysis> {
    debug!(module = %pair.name, "analyzing module pair");

    let source_unit = parse_file(&pair.source)?;
    let header_unit = parse_file(&pair.header)?;

    let (diff, diagnostics) = analyze_units(&source_unit, &header_unit);

    Ok(PairAnalysis {
        pair: pair.clone(),
        diff,
        diagnostics,
    })
}
