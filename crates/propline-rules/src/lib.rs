//! propline-rules: the max-props-per-line rule for JSX opening tags
//!
//! The rule runs as a straight pipeline per element:
//!
//! 1. [`grouping`] splits the element's attributes into line groups
//! 2. [`limits`] resolves how many attributes one line may hold
//! 3. [`planner`] emits a violation with a line-break edit for every
//!    attribute past that limit
//!
//! # Example
//!
//! ```ignore
//! use propline_core::{apply_edits, Element, LineIndex};
//! use propline_rules::{MaxPropsConfig, MaxPropsPerLine, Rule};
//!
//! let config = MaxPropsConfig::from_json(r#"{"maximum": 2}"#)?;
//! let rule = MaxPropsPerLine::new(config);
//! let violations = rule.check(&element);
//! let edits: Vec<_> = violations.iter().map(|v| v.edit.clone()).collect();
//! let fixed = apply_edits(source, &edits)?;
//! ```

pub mod config;
pub mod grouping;
pub mod limits;
mod max_props_per_line;
pub mod planner;
mod rule;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{ConfigError, LineEnding, MaxPropsConfig, MaxPropsOptions, Maximum, When};
pub use grouping::{group_by_line, LineGroup};
pub use limits::LineLimit;
pub use max_props_per_line::MaxPropsPerLine;
pub use planner::{plan_breaks, Violation};
pub use rule::{check_elements, Rule};
