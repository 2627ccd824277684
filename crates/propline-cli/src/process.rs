//! File processing logic for propline

use anyhow::{Context, Result};
use propline_core::{apply_edits, Edit};
use propline_rules::{check_elements, LineEnding, MaxPropsConfig, MaxPropsPerLine, Rule, Violation};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::dump;
use crate::output::ViolationInfo;

/// Result of processing a single dump
pub struct ProcessResult {
    /// Source file the dump describes
    pub source_path: PathBuf,
    /// Violations found, in source order
    pub violations: Vec<ViolationInfo>,
    /// Original source code
    pub old_source: String,
    /// New source code after edits (only if violations were found)
    pub new_source: Option<String>,
}

/// Check the source file behind one element dump.
///
/// `line_ending` fixes the inserted line breaks; `None` reuses the one the
/// source already has.
pub fn process_dump(
    dump_path: &Path,
    config: &MaxPropsConfig,
    line_ending: Option<LineEnding>,
) -> Result<ProcessResult> {
    let dump = dump::load(dump_path)?;
    let elements = dump.elements()?;

    let line_ending = line_ending.unwrap_or_else(|| LineEnding::detect(&dump.source));
    let rule = MaxPropsPerLine::new(config.with_line_ending(line_ending));
    let violations = check_elements(&rule, &elements);

    debug!(
        path = %dump.source_path.display(),
        elements = elements.len(),
        violations = violations.len(),
        "processed dump"
    );

    if violations.is_empty() {
        return Ok(ProcessResult {
            source_path: dump.source_path,
            violations: vec![],
            old_source: dump.source,
            new_source: None,
        });
    }

    let edits: Vec<Edit> = violations.iter().map(|v| v.edit.clone()).collect();
    let new_source = apply_edits(&dump.source, &edits)
        .with_context(|| format!("Failed to apply edits to {}", dump.source_path.display()))?;

    Ok(ProcessResult {
        violations: violations.iter().map(|v| violation_info(&rule, v)).collect(),
        source_path: dump.source_path,
        old_source: dump.source,
        new_source: Some(new_source),
    })
}

/// Write the processed result to the file
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

fn violation_info(rule: &dyn Rule, violation: &Violation) -> ViolationInfo {
    let start = violation.location.start;
    ViolationInfo {
        rule: rule.name().to_string(),
        prop: violation.subject.to_string(),
        line: start.line + 1,
        column: start.column + 1,
        message: violation.message(),
    }
}
