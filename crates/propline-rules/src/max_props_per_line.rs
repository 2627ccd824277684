//! Rule: jsx_max_props_per_line
//!
//! Limits how many props may share one line of a JSX opening tag and moves
//! the excess onto new lines.
//!
//! Pattern (default, one prop per line):
//! ```jsx
//! // Before
//! <App foo bar baz />
//!
//! // After
//! <App foo
//!      bar
//!      baz />
//! ```

use propline_core::Element;
use tracing::debug;

use crate::config::{ConfigError, MaxPropsConfig, MaxPropsOptions};
use crate::grouping::group_by_line;
use crate::planner::{plan_breaks, Violation};
use crate::rule::Rule;

#[derive(Debug, Clone, Default)]
pub struct MaxPropsPerLine {
    config: MaxPropsConfig,
}

impl MaxPropsPerLine {
    pub fn new(config: MaxPropsConfig) -> Self {
        Self { config }
    }

    pub fn from_options(options: &MaxPropsOptions) -> Result<Self, ConfigError> {
        MaxPropsConfig::from_options(options).map(Self::new)
    }

    pub fn config(&self) -> &MaxPropsConfig {
        &self.config
    }
}

impl Rule for MaxPropsPerLine {
    fn name(&self) -> &'static str {
        "jsx_max_props_per_line"
    }

    fn description(&self) -> &'static str {
        "Limit the number of JSX props on a single line"
    }

    #[tracing::instrument(level = "debug", skip_all, fields(
        line = element.span.start.line,
        attributes = element.attributes.len(),
    ))]
    fn check(&self, element: &Element) -> Vec<Violation> {
        if element.is_empty() {
            return Vec::new();
        }

        let limit = self.config.resolve(element.is_multiline());
        if !limit.enforce() {
            debug!("single-line element exempt");
            return Vec::new();
        }

        let groups = group_by_line(&element.attributes);
        let violations = plan_breaks(limit, &groups, &element.indent, self.config.line_ending);

        debug!(
            groups = groups.len(),
            limit = limit.limit(),
            violations = violations.len(),
            "checked element"
        );

        violations
    }
}
