//! Line-break planning for attributes past the per-line limit

use propline_core::{Attribute, AttributeName, Edit, Span};
use serde::Serialize;
use tracing::trace;

use crate::config::LineEnding;
use crate::grouping::LineGroup;
use crate::limits::LineLimit;

/// An attribute that must move to its own line, with the edit that moves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The offending attribute's identifier
    pub subject: AttributeName,
    /// The offending attribute's span
    pub location: Span,
    /// Replaces the whitespace in front of the attribute with a line break
    pub edit: Edit,
}

impl Violation {
    pub fn message(&self) -> String {
        format!("Prop `{}` must be placed on a new line", self.subject)
    }
}

/// Plan a line break before every attribute past `limit` in each group
///
/// A break is followed by `indent`, the element's alignment with its first
/// attribute. Breaks for attributes that sit on the closing line of a
/// multi-line value (`foo={{\n}} bar`) get no indentation: that column means
/// nothing there.
///
/// Violations come back in source order; their edits never overlap.
pub fn plan_breaks(
    limit: LineLimit,
    groups: &[LineGroup<'_>],
    indent: &str,
    line_ending: LineEnding,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for group in groups {
        if limit.excess(group.len()) == 0 {
            continue;
        }

        let anchor_line = group.line();
        for attr in &group.attributes()[limit.limit()..] {
            let indent = if attr.start_line() == anchor_line {
                indent
            } else {
                ""
            };
            violations.push(break_before(attr, line_ending, indent));
        }
    }

    violations
}

fn break_before(attr: &Attribute, line_ending: LineEnding, indent: &str) -> Violation {
    trace!(
        prop = %attr.name,
        line = attr.start_line(),
        column = attr.start_column(),
        "planned line break"
    );

    Violation {
        subject: attr.name.clone(),
        location: attr.span,
        edit: Edit::new(
            attr.leading_whitespace,
            format!("{}{}", line_ending.as_str(), indent),
            format!("Move `{}` to a new line", attr.name),
        ),
    }
}
