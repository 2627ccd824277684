//! Output formatting for propline
//!
//! Supports text (colored terminal), JSON and unified diff output formats.

use anyhow::Result;
use colored::*;
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Diff,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<OutputFormat> {
        match s.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "diff" => Some(OutputFormat::Diff),
            _ => None,
        }
    }
}

/// One violation, positioned for humans (1-based)
#[derive(Debug, Clone, Serialize)]
pub struct ViolationInfo {
    pub rule: String,
    pub prop: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Result of processing a single file
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<ViolationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn success(path: &Path, violations: Vec<ViolationInfo>) -> Self {
        Self {
            path: path.display().to_string(),
            violations,
            error: None,
        }
    }

    pub fn error(path: &Path, error: String) -> Self {
        Self {
            path: path.display().to_string(),
            violations: Vec::new(),
            error: Some(error),
        }
    }
}

/// Summary statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_processed: usize,
    pub files_with_violations: usize,
    pub total_violations: usize,
    pub errors: usize,
}

/// Full JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub version: String,
    pub summary: Summary,
    pub files: Vec<FileResult>,
}

/// Reporter for accumulating and outputting results
pub struct Reporter {
    format: OutputFormat,
    verbose: bool,
    results: Vec<FileResult>,
    summary: Summary,
}

impl Reporter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self {
            format,
            verbose,
            results: Vec::new(),
            summary: Summary::default(),
        }
    }

    /// Report a file with violations (in check mode - showing what would change)
    pub fn report_check(
        &mut self,
        path: &Path,
        violations: Vec<ViolationInfo>,
        old_source: &str,
        new_source: &str,
    ) {
        if violations.is_empty() {
            self.report_clean(path);
            return;
        }

        self.record_violations(violations.len());

        match self.format {
            OutputFormat::Text => {
                println!("{}", path.display().to_string().bold());
                for violation in &violations {
                    println!(
                        "  {}:{} {} {}",
                        violation.line,
                        violation.column,
                        "->".green(),
                        violation.message
                    );
                }
                println!();
                print_diff(old_source, new_source);
                println!();
            }
            OutputFormat::Diff => {
                print!("{}", unified_diff(path, old_source, new_source));
            }
            OutputFormat::Json => {
                // JSON output is handled in finish()
            }
        }

        self.results.push(FileResult::success(path, violations));
    }

    /// Report a file after applying fixes
    pub fn report_fix(&mut self, path: &Path, violations: Vec<ViolationInfo>) {
        if violations.is_empty() {
            self.report_clean(path);
            return;
        }

        self.record_violations(violations.len());

        if self.format == OutputFormat::Text {
            println!("{}", path.display().to_string().bold());
            println!(
                "  {} Moved {} prop(s) to new lines",
                "OK".green(),
                violations.len()
            );
            println!();
        }

        self.results.push(FileResult::success(path, violations));
    }

    /// Report a file that needed no changes
    pub fn report_clean(&mut self, path: &Path) {
        self.summary.files_processed += 1;
        if self.verbose && self.format == OutputFormat::Text {
            println!("{}: No changes needed", path.display());
        }
        self.results.push(FileResult::success(path, vec![]));
    }

    /// Report an error processing a file
    pub fn report_error(&mut self, path: &Path, error: &str) {
        self.summary.files_processed += 1;
        self.summary.errors += 1;

        if self.format == OutputFormat::Text {
            eprintln!("{}: {} - {}", "Warning".yellow(), path.display(), error);
        }

        self.results.push(FileResult::error(path, error.to_string()));
    }

    fn record_violations(&mut self, count: usize) {
        self.summary.files_processed += 1;
        self.summary.files_with_violations += 1;
        self.summary.total_violations += count;
    }

    /// Print final summary/output
    pub fn finish(self, check_mode: bool) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!("{}", "Summary".bold().underline());
                println!("  Files processed: {}", self.summary.files_processed);
                println!(
                    "  Files with violations: {}",
                    self.summary.files_with_violations
                );
                println!("  Total violations: {}", self.summary.total_violations);
                if self.summary.errors > 0 {
                    println!("  Errors: {}", self.summary.errors);
                }

                if check_mode && self.summary.total_violations > 0 {
                    println!();
                    println!("{}", "Run with --fix to apply changes".yellow());
                }
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    summary: self.summary,
                    files: self.results,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Diff => {
                // Patch output only
            }
        }

        Ok(())
    }

    /// Get summary for exit code determination
    pub fn summary(&self) -> &Summary {
        &self.summary
    }
}

/// Print changed lines only, colored
fn print_diff(old: &str, new: &str) {
    let diff = TextDiff::from_lines(old, new);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches(['\n', '\r']);
        match change.tag() {
            ChangeTag::Delete => println!("  {}", format!("- {}", line).red()),
            ChangeTag::Insert => println!("  {}", format!("+ {}", line).green()),
            ChangeTag::Equal => {}
        }
    }
}

/// Unified diff (`diff -u` compatible)
fn unified_diff(path: &Path, old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let path_str = path.display().to_string();

    let mut out = format!("--- a/{}\n+++ b/{}\n", path_str, path_str);

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        out.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            out.push_str(sign);
            out.push_str(change.value());
            if change.missing_newline() {
                out.push_str("\n\\ No newline at end of file\n");
            }
        }
    }

    out
}
