//! Configuration file support for propline
//!
//! Loads `.propline.toml` from current directory or parent directories.

use anyhow::{anyhow, Context, Result};
use propline_rules::config::{MaximumOption, SplitMaximum};
use propline_rules::{LineEnding, MaxPropsConfig, MaxPropsOptions, When};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".propline.toml";

/// Configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Options of `jsx_max_props_per_line`
    pub rule: MaxPropsOptions,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Glob patterns to exclude from processing
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text", "json" or "diff"
    pub format: Option<String>,
    /// Line ending for inserted breaks: "lf" or "crlf". Detected per file when unset.
    pub line_ending: Option<String>,
}

/// Rule options given on the command line
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleOverrides {
    pub maximum: Option<i64>,
    pub single: Option<i64>,
    pub multi: Option<i64>,
    pub when: Option<When>,
}

impl RuleOverrides {
    /// Layer these overrides on top of file options.
    ///
    /// `--maximum` replaces the whole maximum. `--single`/`--multi` replace one
    /// side and keep the other from the file, where a flat number counts for
    /// both sides.
    pub fn apply(&self, mut options: MaxPropsOptions) -> MaxPropsOptions {
        if let Some(max) = self.maximum {
            options.maximum = Some(MaximumOption::Flat(max));
        }

        if self.single.is_some() || self.multi.is_some() {
            let mut split = match options.maximum {
                Some(MaximumOption::Split(split)) => split,
                Some(MaximumOption::Flat(max)) => SplitMaximum {
                    single: Some(max),
                    multi: Some(max),
                },
                None => SplitMaximum::default(),
            };
            split.single = self.single.or(split.single);
            split.multi = self.multi.or(split.multi);
            options.maximum = Some(MaximumOption::Split(split));
        }

        if self.when.is_some() {
            options.when = self.when;
        }

        options
    }
}

impl Config {
    /// Load config from `.propline.toml` searching from current directory upward
    pub fn load() -> Result<Option<(Config, PathBuf)>> {
        Self::load_from(std::env::current_dir()?)
    }

    /// Load config searching from the given directory upward
    pub fn load_from(start_dir: PathBuf) -> Result<Option<(Config, PathBuf)>> {
        let mut current = Some(start_dir.as_path());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load_path(&config_path)?;
                return Ok(Some((config, config_path)));
            }
            current = dir.parent();
        }

        Ok(None)
    }

    /// Load config from a specific path
    pub fn load_path(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Validated rule configuration after command-line overrides
    pub fn rule_config(&self, overrides: &RuleOverrides) -> Result<MaxPropsConfig> {
        let options = overrides.apply(self.rule);
        MaxPropsConfig::from_options(&options).context("Invalid rule options")
    }

    /// Fixed line ending, or `None` to follow each file
    pub fn line_ending(&self, cli: Option<&str>) -> Result<Option<LineEnding>> {
        match cli.or(self.output.line_ending.as_deref()) {
            None => Ok(None),
            Some(value) => LineEnding::parse(value).map(Some).ok_or_else(|| {
                anyhow!("Invalid line ending '{}'. Valid options: lf, crlf", value)
            }),
        }
    }

    /// Check if a path should be excluded based on config patterns
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.paths.exclude {
            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                if glob_pattern.matches(&path_str) {
                    return true;
                }
                if let Some(file_name) = path.file_name() {
                    if glob_pattern.matches(&file_name.to_string_lossy()) {
                        return true;
                    }
                }
            }

            // Directory patterns: "vendor/" excludes anything under a vendor directory
            if pattern.ends_with('/') {
                let dir_pattern = pattern.trim_end_matches('/');
                if path_str.contains(&format!("/{}/", dir_pattern))
                    || path_str.starts_with(&format!("{}/", dir_pattern))
                {
                    return true;
                }
            }
        }

        false
    }
}
