//! Per-element limit resolution

use crate::config::{MaxPropsConfig, When};

/// How many attributes one line of an element may hold (at least 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineLimit {
    enforce: bool,
    limit: usize,
}

impl LineLimit {
    /// A `limit` of 0 is raised to 1
    pub fn new(enforce: bool, limit: usize) -> Self {
        Self {
            enforce,
            limit: limit.max(1),
        }
    }

    /// False when the element is exempt from the rule
    pub fn enforce(&self) -> bool {
        self.enforce
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of attributes in a group of `len` that must move to a new line
    pub fn excess(&self, len: usize) -> usize {
        if self.enforce {
            len.saturating_sub(self.limit)
        } else {
            0
        }
    }
}

impl MaxPropsConfig {
    /// Resolve the limit for an element with the given single/multi-line status
    pub fn resolve(&self, is_multiline: bool) -> LineLimit {
        let enforce = !(self.when == When::Multiline && !is_multiline);
        LineLimit::new(enforce, self.maximum.for_element(is_multiline))
    }
}
