//! propline CLI - re-wrap crowded JSX opening tags
//!
//! Reads element dumps (`*.props.json`) written by a JSX parser, checks the
//! source files they describe with `jsx_max_props_per_line`, and reports or
//! applies the line breaks.

mod config;
mod dump;
mod logging;
mod output;
mod process;

use anyhow::Result;
use clap::Parser;
use colored::*;
use propline_rules::{LineEnding, MaxPropsConfig, When};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

use config::{Config, RuleOverrides};
use output::{OutputFormat, Reporter, ViolationInfo};
use process::{process_dump, write_file};

#[derive(Parser)]
#[command(name = "propline")]
#[command(version)]
#[command(about = "Keep JSX props within a per-line limit")]
struct Cli {
    /// Element dumps or directories containing them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Report violations without changing files (default mode)
    #[arg(long, conflicts_with = "fix")]
    check: bool,

    /// Move offending props onto new lines
    #[arg(long, conflicts_with = "check")]
    fix: bool,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Props allowed per line, for every element
    #[arg(long, value_name = "N", conflicts_with_all = ["single", "multi"])]
    maximum: Option<i64>,

    /// Props allowed per line in single-line elements
    #[arg(long, value_name = "N")]
    single: Option<i64>,

    /// Props allowed per line in multi-line elements
    #[arg(long, value_name = "N")]
    multi: Option<i64>,

    /// When to enforce the limit: always, multiline
    #[arg(long, value_name = "WHEN")]
    when: Option<When>,

    /// Line ending for inserted breaks: lf, crlf (default: match each file)
    #[arg(long, value_name = "EOL")]
    line_ending: Option<String>,

    /// Output format: text, json, diff
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Path to config file (default: auto-detect .propline.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    // Load config file
    let (config, config_path) = if cli.no_config {
        (Config::default(), None)
    } else if let Some(path) = &cli.config {
        (Config::load_path(path)?, Some(path.clone()))
    } else {
        match Config::load()? {
            Some((cfg, path)) => (cfg, Some(path)),
            None => (Config::default(), None),
        }
    };

    // Determine output format
    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        let format = cli
            .format
            .as_deref()
            .or(config.output.format.as_deref())
            .unwrap_or("text");
        OutputFormat::from_str(format).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid output format '{}'. Valid options: text, json, diff",
                format
            )
        })?
    };

    let overrides = RuleOverrides {
        maximum: cli.maximum,
        single: cli.single,
        multi: cli.multi,
        when: cli.when,
    };
    let rule_config = config.rule_config(&overrides)?;
    let line_ending = config.line_ending(cli.line_ending.as_deref())?;

    let fix_mode = cli.fix;
    let check_mode = !fix_mode;

    if cli.verbose && output_format == OutputFormat::Text {
        if let Some(path) = &config_path {
            println!("{}: {}", "Using config".bold(), path.display());
        }
        println!("{}: {}", "Mode".bold(), if fix_mode { "fix" } else { "check" });
        println!("{}: {:?}, when {}", "Maximum".bold(), rule_config.maximum, rule_config.when);
        println!();
    }

    // Collect all dump paths first
    let mut dump_paths: Vec<PathBuf> = Vec::new();
    let mut missing_paths: Vec<PathBuf> = Vec::new();

    for path in &cli.paths {
        if path.is_file() {
            dump_paths.push(path.clone());
        } else if path.is_dir() {
            for entry in walkdir::WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file() && dump::is_dump(e.path()))
            {
                let dump_path = entry.path();
                if !config.should_exclude(dump_path) {
                    dump_paths.push(dump_path.to_path_buf());
                }
            }
        } else {
            missing_paths.push(path.clone());
        }
    }

    debug!(dumps = dump_paths.len(), "collected element dumps");

    // Process dumps in parallel
    let results: Vec<FileResult> = dump_paths
        .par_iter()
        .map(|path| process_to_result(path, &rule_config, line_ending))
        .collect();

    // Sort results by path for deterministic output
    let mut sorted_results: Vec<_> = results.into_iter().zip(dump_paths.iter()).collect();
    sorted_results.sort_by(|a, b| a.1.cmp(b.1));

    let mut reporter = Reporter::new(output_format, cli.verbose);

    for path in &missing_paths {
        if output_format == OutputFormat::Text {
            eprintln!("{}: Path does not exist: {}", "Warning".yellow(), path.display());
        }
    }

    for (result, dump_path) in sorted_results {
        report_result(dump_path, result, fix_mode, &mut reporter);
    }

    // Determine exit code
    let summary = reporter.summary();
    let exit_code = if summary.errors > 0 {
        ExitCode::from(1)
    } else if check_mode && summary.files_with_violations > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    };

    reporter.finish(check_mode)?;

    Ok(exit_code)
}

/// Result of processing a single dump (for parallel processing)
enum FileResult {
    /// Source needs no changes
    Clean { source_path: PathBuf },
    /// Source has violations to report/fix
    HasViolations {
        source_path: PathBuf,
        violations: Vec<ViolationInfo>,
        old_source: String,
        new_source: String,
    },
    /// Dump or source could not be processed
    Error(String),
}

/// Process a dump and return a result (no output, suitable for parallel execution)
fn process_to_result(
    dump_path: &Path,
    config: &MaxPropsConfig,
    line_ending: Option<LineEnding>,
) -> FileResult {
    match process_dump(dump_path, config, line_ending) {
        Ok(result) => match result.new_source {
            Some(new_source) => FileResult::HasViolations {
                source_path: result.source_path,
                violations: result.violations,
                old_source: result.old_source,
                new_source,
            },
            None => FileResult::Clean {
                source_path: result.source_path,
            },
        },
        Err(e) => FileResult::Error(format!("{:#}", e)),
    }
}

/// Report a result and optionally apply fixes
fn report_result(dump_path: &Path, result: FileResult, fix_mode: bool, reporter: &mut Reporter) {
    match result {
        FileResult::Clean { source_path } => {
            reporter.report_clean(&source_path);
        }
        FileResult::HasViolations {
            source_path,
            violations,
            old_source,
            new_source,
        } => {
            if !fix_mode {
                reporter.report_check(&source_path, violations, &old_source, &new_source);
            } else if let Err(e) = write_file(&source_path, &new_source) {
                reporter.report_error(&source_path, &format!("{:#}", e));
            } else {
                reporter.report_fix(&source_path, violations);
            }
        }
        FileResult::Error(msg) => {
            reporter.report_error(dump_path, &msg);
        }
    }
}
