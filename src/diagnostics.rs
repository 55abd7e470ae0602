//! Issue counting for linter output
//!
//! Each tool prints a differently shaped JSON document:
//!
//! - ESLint: `[{ "messages": [{ "severity": 1 | 2, ... }] }, ...]`
//! - Oxlint: `{ "diagnostics": [{ "severity": "error" | "warning", ... }] }`
//!
//! Parsing is best-effort. Output that is not JSON falls back to a coarse
//! text scan, and [`ParsedReport`] records which path produced the numbers.
//! The text scan is approximate: any occurrence of "error" or "warning" in
//! the raw output counts, including ones inside file paths.

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON output shape produced by a linter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolFormat {
    /// Array of per-file results with numeric `severity` messages
    EslintJson,
    /// Object with a top-level `diagnostics` array of string severities
    OxlintJson,
}

/// Error and warning totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCounts {
    pub errors: u64,
    pub warnings: u64,
}

impl IssueCounts {
    pub fn new(errors: u64, warnings: u64) -> Self {
        Self { errors, warnings }
    }

    pub fn total(&self) -> u64 {
        self.errors + self.warnings
    }
}

/// Issue counts tagged with the parsing path that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ParsedReport {
    /// Counted from the tool's JSON document
    Structured { errors: u64, warnings: u64 },
    /// Counted by scanning raw text after JSON parsing failed
    Heuristic { errors: u64, warnings: u64 },
}

impl ParsedReport {
    /// Counts regardless of parsing path
    pub fn counts(&self) -> IssueCounts {
        match *self {
            ParsedReport::Structured { errors, warnings }
            | ParsedReport::Heuristic { errors, warnings } => IssueCounts { errors, warnings },
        }
    }

    pub fn errors(&self) -> u64 {
        self.counts().errors
    }

    pub fn warnings(&self) -> u64 {
        self.counts().warnings
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ParsedReport::Structured { .. })
    }

    fn structured(counts: IssueCounts) -> Self {
        ParsedReport::Structured {
            errors: counts.errors,
            warnings: counts.warnings,
        }
    }

    fn heuristic(counts: IssueCounts) -> Self {
        ParsedReport::Heuristic {
            errors: counts.errors,
            warnings: counts.warnings,
        }
    }
}

/// Count errors and warnings in a tool's captured stdout
///
/// Never fails. Empty or unparseable input goes through the text scan, which
/// yields zero counts for empty input.
///
/// # Example
/// ```
/// use lintbench::diagnostics::{parse_report, ParsedReport, ToolFormat};
///
/// let out = r#"{"diagnostics":[{"severity":"error"},{"severity":"warning"}]}"#;
/// assert_eq!(
///     parse_report(ToolFormat::OxlintJson, out),
///     ParsedReport::Structured { errors: 1, warnings: 1 }
/// );
/// ```
pub fn parse_report(format: ToolFormat, output: &str) -> ParsedReport {
    match serde_json::from_str::<Value>(output) {
        Ok(document) => {
            let counts = match format {
                ToolFormat::EslintJson => count_eslint_json(&document),
                ToolFormat::OxlintJson => count_oxlint_json(&document),
            };
            tracing::debug!(?format, ?counts, "counted issues from JSON output");
            ParsedReport::structured(counts)
        }
        Err(e) => {
            let counts = match format {
                ToolFormat::EslintJson => count_eslint_text(output),
                ToolFormat::OxlintJson => count_oxlint_text(output),
            };
            tracing::debug!(?format, ?counts, error = %e, "output is not JSON, scanned text");
            ParsedReport::heuristic(counts)
        }
    }
}

fn count_eslint_json(document: &Value) -> IssueCounts {
    let mut counts = IssueCounts::default();
    let Some(files) = document.as_array() else {
        return counts;
    };

    let messages = files
        .iter()
        .filter_map(|file| file.get("messages").and_then(Value::as_array))
        .flatten();

    for message in messages {
        match message.get("severity").and_then(Value::as_f64) {
            Some(s) if s == 2.0 => counts.errors += 1,
            Some(s) if s == 1.0 => counts.warnings += 1,
            _ => {}
        }
    }
    counts
}

fn count_oxlint_json(document: &Value) -> IssueCounts {
    let mut counts = IssueCounts::default();
    let Some(diagnostics) = document.get("diagnostics").and_then(Value::as_array) else {
        return counts;
    };

    for diagnostic in diagnostics {
        match diagnostic.get("severity").and_then(Value::as_str) {
            Some("error") => counts.errors += 1,
            Some("warning") => counts.warnings += 1,
            _ => {}
        }
    }
    counts
}

/// Case-insensitive occurrence count over the whole output
fn count_eslint_text(output: &str) -> IssueCounts {
    IssueCounts {
        errors: count_word(output, "error"),
        warnings: count_word(output, "warning"),
    }
}

/// One issue per line: "error" wins, then "warning" or the warning glyph
fn count_oxlint_text(output: &str) -> IssueCounts {
    let mut counts = IssueCounts::default();
    for line in output.split('\n') {
        if line.contains("error") {
            counts.errors += 1;
        } else if line.contains("warning") || line.contains('⚠') {
            counts.warnings += 1;
        }
    }
    counts
}

fn count_word(haystack: &str, word: &str) -> u64 {
    RegexBuilder::new(&regex::escape(word))
        .case_insensitive(true)
        .build()
        .map_or(0, |re| re.find_iter(haystack).count() as u64)
}
