//! Rule trait for element checks

use propline_core::Element;

use crate::planner::Violation;

/// A check over one JSX opening tag
pub trait Rule: Send + Sync {
    /// The unique identifier for this rule (e.g., "jsx_max_props_per_line")
    fn name(&self) -> &'static str;

    /// A short description of what this rule does
    fn description(&self) -> &'static str;

    /// Check one element and return its violations in source order
    fn check(&self, element: &Element) -> Vec<Violation>;
}

/// Run a rule over every element of a file
pub fn check_elements(rule: &dyn Rule, elements: &[Element]) -> Vec<Violation> {
    elements
        .iter()
        .flat_map(|element| rule.check(element))
        .collect()
}
