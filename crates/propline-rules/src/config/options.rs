//! `maximum` and `when` options

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::LineEnding;

/// Errors for options that can't be turned into a usable config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`{field}` must be an integer >= 1, got {value}")]
    MaximumOutOfRange { field: &'static str, value: i64 },

    #[error("Unknown `when` value {0:?}, expected \"always\" or \"multiline\"")]
    UnknownWhen(String),

    #[error("Expected at most one options object, got {0}")]
    TooManyOptions(usize),

    #[error("Invalid rule options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Which elements the limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum When {
    /// Every element
    #[default]
    Always,
    /// Only elements whose opening tag already spans several lines
    Multiline,
}

impl FromStr for When {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always" => Ok(When::Always),
            "multiline" => Ok(When::Multiline),
            other => Err(ConfigError::UnknownWhen(other.to_string())),
        }
    }
}

impl TryFrom<String> for When {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            When::Always => f.write_str("always"),
            When::Multiline => f.write_str("multiline"),
        }
    }
}

/// `maximum` as written: a number, or `{ single, multi }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MaximumOption {
    Flat(i64),
    Split(SplitMaximum),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitMaximum {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub single: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi: Option<i64>,
}

/// Unvalidated rule options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaxPropsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<MaximumOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
}

/// Validated per-line maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Maximum {
    /// Same cap for single-line and multi-line elements
    Flat(usize),
    /// Separate caps; a side the user left out is 1
    Split { single: usize, multi: usize },
}

impl Default for Maximum {
    fn default() -> Self {
        Maximum::Flat(1)
    }
}

impl Maximum {
    /// The cap for an element with the given single/multi-line status
    pub fn for_element(&self, is_multiline: bool) -> usize {
        match *self {
            Maximum::Flat(max) => max,
            Maximum::Split { single, .. } if !is_multiline => single,
            Maximum::Split { multi, .. } => multi,
        }
    }
}

/// Validated rule configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaxPropsConfig {
    pub maximum: Maximum,
    pub when: When,
    pub line_ending: LineEnding,
}

impl MaxPropsConfig {
    /// Validate options, rejecting anything below 1
    pub fn from_options(options: &MaxPropsOptions) -> Result<Self, ConfigError> {
        let maximum = match options.maximum {
            None => Maximum::default(),
            Some(MaximumOption::Flat(value)) => Maximum::Flat(at_least_one("maximum", value)?),
            Some(MaximumOption::Split(split)) => Maximum::Split {
                single: split
                    .single
                    .map_or(Ok(1), |value| at_least_one("maximum.single", value))?,
                multi: split
                    .multi
                    .map_or(Ok(1), |value| at_least_one("maximum.multi", value))?,
            },
        };

        Ok(Self {
            maximum,
            when: options.when.unwrap_or_default(),
            line_ending: LineEnding::default(),
        })
    }

    /// Parse and validate JSON options.
    ///
    /// Accepts a bare options object or an ESLint-style options array holding
    /// that object; `null` and `[]` give the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        let value = match value {
            Value::Array(items) if items.len() > 1 => {
                return Err(ConfigError::TooManyOptions(items.len()))
            }
            Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
            other => other,
        };

        let options: MaxPropsOptions = if value.is_null() {
            MaxPropsOptions::default()
        } else {
            serde_json::from_value(value)?
        };

        Self::from_options(&options)
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

fn at_least_one(field: &'static str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value)
        .ok()
        .filter(|max| *max >= 1)
        .ok_or(ConfigError::MaximumOutOfRange { field, value })
}
