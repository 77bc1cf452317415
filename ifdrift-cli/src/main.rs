//! ifdrift CLI - interface drift checker for C header/source pairs.
//!
//! Checks that the externally visible function definitions in a
//! module's `.c` file match the declarations in its `.h` file:
//!
//! - `ifdrift net/socket` checks `net/socket.c` against `net/socket.h`
//! - `ifdrift --source a.c --header b.h` checks an explicit pair
//! - `ifdrift --all src/` checks every pair found under a directory
//!
//! Exit codes: 0 when the pair(s) agree, 1 when drift was found,
//! 2 on usage or analysis errors.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use ifdrift_core::{
    analyze_pair, analyze_pairs, gather_module_pairs, init_structured_logging, load_config,
    print_json, print_plain, to_json, ModulePair, PairAnalysis,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Interface drift checker for C header/source pairs")]
pub struct Cli {
    /// Module stem: '<module>.c' and '<module>.h' are checked against
    /// each other (give the stem, not a filename with extension)
    module: Option<String>,

    /// Explicit path to the .c translation unit
    #[arg(long, requires = "header", conflicts_with = "module")]
    source: Option<PathBuf>,

    /// Explicit path to the .h header
    #[arg(long, requires = "source", conflicts_with = "module")]
    header: Option<PathBuf>,

    /// Check every module pair found under a directory
    #[arg(long, value_name = "DIR", conflicts_with_all = ["module", "source", "header"])]
    all: Option<PathBuf>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Symbol names to ignore in drift reports
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,
}

/// Checks if a symbol name should be ignored based on patterns.
fn is_ignored(symbol: &str, ignore: &[String]) -> bool {
    ignore
        .iter()
        .any(|p| p == symbol || symbol.ends_with(p) || symbol.contains(p))
}

/// Drops ignored symbols from both drift directions. Matched symbols
/// stay; they are not findings.
fn filter_ignored(analysis: &mut PairAnalysis, ignore: &[String]) {
    analysis
        .diff
        .missing_from_header
        .retain(|e| !is_ignored(&e.name, ignore));
    analysis
        .diff
        .missing_from_source
        .retain(|e| !is_ignored(&e.name, ignore));
}

/// The module argument takes a stem, not a filename: reject a
/// trailing `.c`/`.h` with a hint instead of checking the wrong pair.
fn validate_module_arg(module: &str) -> Result<()> {
    for ext in [".c", ".h"] {
        if let Some(stem) = module.strip_suffix(ext) {
            bail!(
                "give the module stem, not a filename: try '{}' instead of '{}'",
                stem,
                module
            );
        }
    }
    Ok(())
}

/// Merge config-file settings into the CLI options. CLI flags win.
fn apply_config(root: &Path, json: &mut bool, ignore: &mut Vec<String>) {
    match load_config(root) {
        Ok(Some(cfg)) => {
            if let Some(list) = cfg.ignore {
                ignore.extend(list);
            }
            if !*json {
                if let Some(output) = cfg.output {
                    if output.format.as_deref() == Some("json") {
                        *json = true;
                    }
                }
            }
        }
        Ok(None) => {} // No config file - that's fine
        Err(e) => {
            eprintln!("[WARN] config load failed: {}", e);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut json = cli.json;
    let mut ignore = cli.ignore.clone();

    // Batch mode: every pair under a directory.
    if let Some(ref dir) = cli.all {
        apply_config(dir, &mut json, &mut ignore);

        let pairs = gather_module_pairs(dir)
            .with_context(|| format!("Failed to scan {}", dir.display()))?;
        if pairs.is_empty() {
            eprintln!("No module pairs found under {}", dir.display());
            return Ok(false);
        }

        let mut analyses = analyze_pairs(&pairs);
        for analysis in &mut analyses {
            filter_ignored(analysis, &ignore);
        }

        let drifted = analyses.iter().any(|a| !a.is_clean());
        if json {
            let values: Vec<serde_json::Value> = analyses.iter().map(to_json).collect();
            println!("{}", serde_json::to_string_pretty(&values)?);
        } else {
            for analysis in &analyses {
                print_plain(analysis);
            }
            eprintln!(
                "Checked {} module pair(s), {} with drift.",
                analyses.len(),
                analyses.iter().filter(|a| !a.is_clean()).count()
            );
        }
        return Ok(drifted);
    }

    // Single pair: explicit paths or module stem.
    let pair = if let (Some(source), Some(header)) = (&cli.source, &cli.header) {
        ModulePair::explicit(source, header)
    } else if let Some(ref module) = cli.module {
        validate_module_arg(module)?;
        ModulePair::from_module(module)?
    } else {
        bail!("provide a module stem, --source/--header, or --all <dir> (see --help)");
    };

    apply_config(Path::new("."), &mut json, &mut ignore);

    let mut analysis = analyze_pair(&pair)
        .with_context(|| format!("Failed to analyze module '{}'", pair.name))?;
    filter_ignored(&mut analysis, &ignore);

    if json {
        print_json(&analysis);
    } else {
        print_plain(&analysis);
    }

    Ok(!analysis.is_clean())
}

fn main() {
    // Global panic guard
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] ifdrift internal error: {}", info);
        eprintln!("[PANIC] The process will exit safely with code 2.");
    }));

    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();
    match run(cli) {
        Ok(drifted) => std::process::exit(if drifted { 1 } else { 0 }),
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifdrift_core::{DiffResult, DriftEntry, Location};

    // --- is_ignored TESTS ---

    #[test]
    fn test_is_ignored_exact_match() {
        let ignore = vec!["main".to_string()];
        assert!(is_ignored("main", &ignore));
        // Contains-based matching: "main_loop" contains "main".
        assert!(is_ignored("main_loop", &ignore));
    }

    #[test]
    fn test_is_ignored_suffix_match() {
        let ignore = vec!["_internal".to_string()];
        assert!(is_ignored("frob_internal", &ignore));
        assert!(!is_ignored("internal_frob", &ignore));
    }

    #[test]
    fn test_is_ignored_empty_list() {
        assert!(!is_ignored("anything", &[]));
    }

    // --- validate_module_arg TESTS ---

    #[test]
    fn test_module_arg_rejects_c_filename() {
        let err = validate_module_arg("socket.c").unwrap_err();
        assert!(err.to_string().contains("'socket'"));
    }

    #[test]
    fn test_module_arg_rejects_h_filename() {
        assert!(validate_module_arg("socket.h").is_err());
    }

    #[test]
    fn test_module_arg_accepts_stem() {
        assert!(validate_module_arg("net/socket").is_ok());
        // Dotted stems that are not .c/.h pass through.
        assert!(validate_module_arg("lib.posix").is_ok());
    }

    // --- filter_ignored TESTS ---

    fn drift(name: &str) -> DriftEntry {
        DriftEntry {
            name: name.to_string(),
            location: Location { line: 1, column: 1 },
        }
    }

    #[test]
    fn test_filter_ignored_drops_both_directions() {
        let mut analysis = PairAnalysis {
            pair: ModulePair::explicit("m.c", "m.h"),
            diff: DiffResult {
                missing_from_header: vec![drift("keep_me"), drift("main")],
                missing_from_source: vec![drift("main")],
                matched: Vec::new(),
            },
            diagnostics: Vec::new(),
        };

        filter_ignored(&mut analysis, &["main".to_string()]);

        assert_eq!(analysis.diff.missing_from_header.len(), 1);
        assert_eq!(analysis.diff.missing_from_header[0].name, "keep_me");
        assert!(analysis.diff.missing_from_source.is_empty());
        assert!(analysis.is_clean());
    }
}
