//! Output formatting - plaintext and JSON.
//!
//! The comparator leaves its sets unordered; everything here sorts by
//! source location, then name, so reports are stable run to run.

use serde_json::json;

use crate::compare::{DriftEntry, MatchedEntry};
use crate::pair::PairAnalysis;

fn sorted_drift(entries: &[DriftEntry]) -> Vec<&DriftEntry> {
    let mut sorted: Vec<&DriftEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.location.cmp(&b.location).then_with(|| a.name.cmp(&b.name)));
    sorted
}

fn sorted_matched(entries: &[MatchedEntry]) -> Vec<&MatchedEntry> {
    let mut sorted: Vec<&MatchedEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| {
        a.source_location
            .cmp(&b.source_location)
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

/// Renders a pair analysis as plain text.
pub fn render_plain(analysis: &PairAnalysis) -> String {
    let mut out = String::new();
    let source = analysis.pair.source.display();
    let header = analysis.pair.header.display();

    if !analysis.diff.missing_from_header.is_empty() {
        out.push_str(&format!(
            "Externally visible definitions in '{source}' that are not in '{header}':\n"
        ));
        for entry in sorted_drift(&analysis.diff.missing_from_header) {
            out.push_str(&format!(
                "  {} ({}:{})\n",
                entry.name, source, entry.location.line
            ));
        }
        out.push('\n');
    }

    if !analysis.diff.missing_from_source.is_empty() {
        out.push_str(&format!(
            "Declarations in '{header}' that have no externally visible definition in '{source}':\n"
        ));
        for entry in sorted_drift(&analysis.diff.missing_from_source) {
            out.push_str(&format!(
                "  {} ({}:{})\n",
                entry.name, header, entry.location.line
            ));
        }
        out.push('\n');
    }

    if analysis.diff.is_clean() {
        out.push_str(&format!("'{source}' and '{header}' agree.\n"));
    }

    if !analysis.diagnostics.is_empty() {
        out.push_str("DIAGNOSTICS:\n");
        for diag in &analysis.diagnostics {
            out.push_str(&format!("  {diag}\n"));
        }
    }

    out
}

/// Renders a pair analysis as a JSON value.
pub fn to_json(analysis: &PairAnalysis) -> serde_json::Value {
    json!({
        "module": analysis.pair.name,
        "source": analysis.pair.source.display().to_string(),
        "header": analysis.pair.header.display().to_string(),
        "clean": analysis.is_clean(),
        "missing_from_header": sorted_drift(&analysis.diff.missing_from_header),
        "missing_from_source": sorted_drift(&analysis.diff.missing_from_source),
        "matched": sorted_matched(&analysis.diff.matched),
        "diagnostics": analysis.diagnostics,
    })
}

/// Prints a pair analysis in plain text format.
pub fn print_plain(analysis: &PairAnalysis) {
    print!("{}", render_plain(analysis));
}

/// Prints a pair analysis in JSON format.
///
/// Falls back to the plain format if serialization fails (should never
/// happen with these value types).
pub fn print_json(analysis: &PairAnalysis) {
    match serde_json::to_string_pretty(&to_json(analysis)) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            print_plain(analysis);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::DiffResult;
    use crate::pair::ModulePair;
    use crate::parse::Location;

    fn analysis_with(diff: DiffResult) -> PairAnalysis {
        PairAnalysis {
            pair: ModulePair::explicit("calc.c", "calc.h"),
            diff,
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_render_plain_clean() {
        let text = render_plain(&analysis_with(DiffResult::default()));
        assert!(text.contains("'calc.c' and 'calc.h' agree."));
    }

    #[test]
    fn test_render_plain_missing_from_header() {
        let diff = DiffResult {
            missing_from_header: vec![DriftEntry {
                name: "frobnicate".to_string(),
                location: Location { line: 12, column: 5 },
            }],
            ..Default::default()
        };
        let text = render_plain(&analysis_with(diff));
        assert!(text
            .contains("Externally visible definitions in 'calc.c' that are not in 'calc.h':"));
        assert!(text.contains("  frobnicate (calc.c:12)"));
    }

    #[test]
    fn test_render_plain_missing_from_source() {
        let diff = DiffResult {
            missing_from_source: vec![DriftEntry {
                name: "ghost".to_string(),
                location: Location { line: 3, column: 5 },
            }],
            ..Default::default()
        };
        let text = render_plain(&analysis_with(diff));
        assert!(text.contains(
            "Declarations in 'calc.h' that have no externally visible definition in 'calc.c':"
        ));
        assert!(text.contains("  ghost (calc.h:3)"));
    }

    #[test]
    fn test_render_plain_sorts_by_location() {
        let diff = DiffResult {
            missing_from_header: vec![
                DriftEntry {
                    name: "second".to_string(),
                    location: Location { line: 20, column: 1 },
                },
                DriftEntry {
                    name: "first".to_string(),
                    location: Location { line: 4, column: 1 },
                },
            ],
            ..Default::default()
        };
        let text = render_plain(&analysis_with(diff));
        let first_pos = text.find("first").unwrap();
        let second_pos = text.find("second").unwrap();
        assert!(first_pos < second_pos);
    }

    #[test]
    fn test_to_json_shape() {
        let diff = DiffResult {
            missing_from_header: vec![DriftEntry {
                name: "frobnicate".to_string(),
                location: Location { line: 12, column: 5 },
            }],
            ..Default::default()
        };
        let value = to_json(&analysis_with(diff));
        assert_eq!(value["module"], "calc");
        assert_eq!(value["clean"], false);
        assert_eq!(value["missing_from_header"][0]["name"], "frobnicate");
        assert_eq!(value["missing_from_header"][0]["location"]["line"], 12);
        assert_eq!(value["missing_from_source"].as_array().unwrap().len(), 0);
    }
}
