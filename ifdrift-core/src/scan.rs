//! Parallel, deterministic discovery of module pairs under a tree.
//!
//! Walks a directory for `.c` files that have a sibling `.h`, prunes
//! build and VCS directories before descending into them, and offers
//! batch analysis across the discovered pairs. Each pair analysis is
//! independent; workers share nothing mutable.

use anyhow::{Context, Result};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::IfdriftResult;
use crate::pair::{analyze_pair, ModulePair, PairAnalysis};

/// Directories to exclude by default (build output and VCS metadata).
const EXCLUDED_DIRS: &[&str] = &[".git", ".svn", "build", "target", "node_modules"];

/// Checks if a directory entry should be pruned (excluded from
/// traversal). Runs in `WalkDir::filter_entry`, skipping whole
/// subtrees in O(1).
#[inline]
fn is_excluded_dir(entry: &walkdir::DirEntry, excludes: &HashSet<&str>) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| excludes.contains(name))
}

/// Gathers all module pairs under `root`: every `.c` file with a
/// sibling `.h` of the same stem.
///
/// `.c` files without a header are skipped silently - a translation
/// unit with no public interface is not a pairing error. Results are
/// sorted by module name so batch output is deterministic.
pub fn gather_module_pairs(root: &Path) -> Result<Vec<ModulePair>> {
    let excludes: HashSet<&str> = EXCLUDED_DIRS.iter().copied().collect();

    let mut pairs: Vec<ModulePair> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, &excludes))
        .par_bridge()
        .filter_map(|entry| match entry {
            Ok(e) => {
                let path = e.path();
                if !path.is_file() || !path.extension().is_some_and(|ext| ext == "c") {
                    return None;
                }
                let header = path.with_extension("h");
                if !header.exists() {
                    return None;
                }
                let name = path.with_extension("").display().to_string();
                Some(Ok(ModulePair {
                    name,
                    source: path.to_path_buf(),
                    header,
                }))
            }
            Err(e) => Some(Err(e.into())),
        })
        .collect::<Result<Vec<_>>>()
        .context(format!(
            "Failed to gather module pairs from {}",
            root.display()
        ))?;

    pairs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(pairs)
}

/// Analyzes all pairs in parallel, skipping pairs that fail to parse
/// (lenient mode). Failures are logged and dropped.
pub fn analyze_pairs(pairs: &[ModulePair]) -> Vec<PairAnalysis> {
    pairs
        .par_iter()
        .filter_map(|pair| match analyze_pair(pair) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                warn!(module = %pair.name, error = %e, "skipping module pair");
                None
            }
        })
        .collect()
}

/// Analyzes all pairs in parallel with fail-fast error handling.
/// Returns the first error encountered.
pub fn analyze_pairs_strict(pairs: &[ModulePair]) -> IfdriftResult<Vec<PairAnalysis>> {
    let results: Vec<IfdriftResult<PairAnalysis>> =
        pairs.par_iter().map(analyze_pair).collect();

    results.into_iter().collect()
}
