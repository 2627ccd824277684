//! JSX opening tags and their attributes
//!
//! Elements are built from byte spans handed over by an external parser.
//! Ingestion validates the spans once and resolves everything the rule
//! needs later: positions, the reported identifier of each attribute and
//! the whitespace run in front of it. Nothing downstream has to look at
//! the source text again.

use serde::Serialize;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

use crate::span::{LineIndex, Span};

/// Errors for element spans that don't describe a well-formed opening tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("Span {start}..{end} ends before it starts")]
    InvertedSpan { start: usize, end: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Attribute {start}..{end} lies outside its element {tag_start}..{tag_end}")]
    OutsideElement {
        start: usize,
        end: usize,
        tag_start: usize,
        tag_end: usize,
    },

    #[error("Attribute at offset {start} overlaps the previous attribute ending at {previous_end}")]
    OutOfOrder { start: usize, previous_end: usize },

    #[error("Attribute at offset {0} is empty")]
    EmptyAttribute(usize),

    #[error("Attribute at offset {offset} has no name: {text:?}")]
    Malformed { offset: usize, text: String },

    #[error("Element {start}..{end} overlaps element {other_start}..{other_end}")]
    OverlappingElements {
        start: usize,
        end: usize,
        other_start: usize,
        other_end: usize,
    },
}

/// The identifier an attribute is reported by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum AttributeName {
    /// `foo`, `foo="x"`, `xlink:href={y}`
    Named(String),
    /// `{...expr}`, reported by the text of `expr`
    Spread(String),
}

impl AttributeName {
    /// Derive the identifier from an attribute's source text
    pub fn from_source(text: &str) -> Option<Self> {
        let text = text.trim();

        if let Some(inner) = text.strip_prefix('{') {
            let inner = inner.strip_suffix('}').unwrap_or(inner).trim();
            let argument = inner.strip_prefix("...")?.trim();
            return (!argument.is_empty()).then(|| AttributeName::Spread(argument.to_string()));
        }

        let name = text
            .split(|c: char| c == '=' || c.is_whitespace())
            .next()
            .unwrap_or_default();

        (!name.is_empty()).then(|| AttributeName::Named(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttributeName::Named(name) | AttributeName::Spread(name) => name,
        }
    }

    pub fn is_spread(&self) -> bool {
        matches!(self, AttributeName::Spread(_))
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attribute of an opening tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: AttributeName,
    pub span: Span,
    /// Whitespace run between the previous token and this attribute
    /// (empty when the attribute directly follows a comment or brace)
    pub leading_whitespace: Span,
}

impl Attribute {
    pub fn new(name: AttributeName, span: Span, leading_whitespace: Span) -> Self {
        Self {
            name,
            span,
            leading_whitespace,
        }
    }

    pub fn start_line(&self) -> usize {
        self.span.start.line
    }

    pub fn end_line(&self) -> usize {
        self.span.end.line
    }

    pub fn start_column(&self) -> usize {
        self.span.start.column
    }
}

/// A JSX opening tag (`<App ... />` or `<App ...>`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// From the opening `<` through the closing `>` or `/>`
    pub span: Span,
    pub attributes: Vec<Attribute>,
    /// Whitespace that lines a new line up with the first attribute
    pub indent: String,
}

impl Element {
    /// Build from resolved attributes, indenting with spaces to the first one
    pub fn new(span: Span, attributes: Vec<Attribute>) -> Self {
        let indent = attributes
            .first()
            .map(|attr| " ".repeat(attr.start_column()))
            .unwrap_or_default();

        Self {
            span,
            attributes,
            indent,
        }
    }

    /// Build an element from the byte spans of its tag and attributes.
    ///
    /// Attributes must be given in source order, non-empty, non-overlapping
    /// and inside the tag span. The whole element is rejected otherwise.
    pub fn from_spans(
        index: &LineIndex<'_>,
        tag: Range<usize>,
        attributes: &[Range<usize>],
    ) -> Result<Self, IngestError> {
        let source = index.source();
        check_range(source, &tag)?;

        let mut resolved = Vec::with_capacity(attributes.len());
        // The tag name sits between `<` and the first attribute; whitespace
        // scanning never reaches back past this bound.
        let mut previous_end = tag.start + 1;

        for range in attributes {
            check_range(source, range)?;

            if range.start == range.end {
                return Err(IngestError::EmptyAttribute(range.start));
            }
            if range.start <= tag.start || range.end > tag.end {
                return Err(IngestError::OutsideElement {
                    start: range.start,
                    end: range.end,
                    tag_start: tag.start,
                    tag_end: tag.end,
                });
            }
            if range.start < previous_end {
                return Err(IngestError::OutOfOrder {
                    start: range.start,
                    previous_end,
                });
            }

            let text = &source[range.clone()];
            let name = AttributeName::from_source(text).ok_or_else(|| IngestError::Malformed {
                offset: range.start,
                text: text.to_string(),
            })?;

            let before = source.get(previous_end..range.start).unwrap_or_default();
            let whitespace_start = previous_end + before.trim_end().len();

            resolved.push(Attribute::new(
                name,
                index.span(range.clone()),
                index.span(whitespace_start..range.start),
            ));
            previous_end = range.end;
        }

        let indent = match attributes.first() {
            Some(first) => {
                let prefix = &source[..first.start];
                let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
                indent_for(&prefix[line_start..])
            }
            None => String::new(),
        };

        Ok(Self {
            span: index.span(tag),
            attributes: resolved,
            indent,
        })
    }

    /// Whether the tag's closing `>` is on a different line than its `<`
    pub fn is_multiline(&self) -> bool {
        self.span.is_multiline()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Reject a file's elements when a tag is listed twice or two tags cross.
///
/// A tag nested wholly inside another (`render={<Child a b />}`) is allowed.
pub fn check_disjoint(elements: &[Element]) -> Result<(), IngestError> {
    let mut ranges: Vec<Range<usize>> = elements.iter().map(|e| e.span.range()).collect();
    ranges.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut open: Vec<Range<usize>> = Vec::new();
    for range in ranges {
        while open.last().is_some_and(|outer| outer.end <= range.start) {
            open.pop();
        }
        if let Some(outer) = open.last() {
            if *outer == range || range.end > outer.end {
                return Err(IngestError::OverlappingElements {
                    start: range.start,
                    end: range.end,
                    other_start: outer.start,
                    other_end: outer.end,
                });
            }
        }
        open.push(range);
    }

    Ok(())
}

/// Tabs are kept so the indent lines up under any tab width
fn indent_for(line_prefix: &str) -> String {
    line_prefix
        .chars()
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

fn check_range(source: &str, range: &Range<usize>) -> Result<(), IngestError> {
    if range.end < range.start {
        return Err(IngestError::InvertedSpan {
            start: range.start,
            end: range.end,
        });
    }
    if range.end > source.len() {
        return Err(IngestError::SpanOutOfBounds {
            start: range.start,
            end: range.end,
            len: source.len(),
        });
    }
    for offset in [range.start, range.end] {
        if !source.is_char_boundary(offset) {
            return Err(IngestError::NotCharBoundary(offset));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_of(source: &str, needle: &str) -> Range<usize> {
        let start = source.find(needle).unwrap();
        start..start + needle.len()
    }

    // ==================== Attribute names ====================

    #[test]
    fn test_named_attribute_names() {
        assert_eq!(
            AttributeName::from_source("foo"),
            Some(AttributeName::Named("foo".to_string()))
        );
        assert_eq!(
            AttributeName::from_source("foo={{\n}}"),
            Some(AttributeName::Named("foo".to_string()))
        );
        assert_eq!(
            AttributeName::from_source("xlink:href=\"#a\""),
            Some(AttributeName::Named("xlink:href".to_string()))
        );
    }

    #[test]
    fn test_spread_attribute_names() {
        assert_eq!(
            AttributeName::from_source("{...this.props}"),
            Some(AttributeName::Spread("this.props".to_string()))
        );
        assert_eq!(
            AttributeName::from_source("{\n  ...rest\n}"),
            Some(AttributeName::Spread("rest".to_string()))
        );
    }

    #[test]
    fn test_malformed_attribute_names() {
        assert_eq!(AttributeName::from_source("{foo}"), None);
        assert_eq!(AttributeName::from_source("{...}"), None);
        assert_eq!(AttributeName::from_source("=1"), None);
    }

    #[test]
    fn test_display_and_kind() {
        let spread = AttributeName::Spread("rest".to_string());
        assert_eq!(spread.to_string(), "rest");
        assert!(spread.is_spread());
        assert!(!AttributeName::Named("foo".to_string()).is_spread());
    }

    // ==================== Ingestion ====================

    #[test]
    fn test_from_spans_single_line() {
        let source = "<App foo {...this.props} />";
        let index = LineIndex::new(source);
        let element = Element::from_spans(
            &index,
            0..source.len(),
            &[range_of(source, "foo"), range_of(source, "{...this.props}")],
        )
        .unwrap();

        assert!(!element.is_multiline());
        assert_eq!(element.attributes.len(), 2);

        let foo = &element.attributes[0];
        assert_eq!(foo.name, AttributeName::Named("foo".to_string()));
        assert_eq!(foo.start_column(), 5);
        assert_eq!(foo.leading_whitespace.range(), 4..5);

        let spread = &element.attributes[1];
        assert_eq!(spread.name, AttributeName::Spread("this.props".to_string()));
        assert_eq!(spread.leading_whitespace.range(), 8..9);
    }

    #[test]
    fn test_from_spans_multiline_value() {
        let source = "<App foo={{\n}} bar />";
        let index = LineIndex::new(source);
        let element = Element::from_spans(
            &index,
            0..source.len(),
            &[range_of(source, "foo={{\n}}"), range_of(source, "bar")],
        )
        .unwrap();

        assert!(element.is_multiline());
        assert_eq!(element.attributes[0].start_line(), 0);
        assert_eq!(element.attributes[0].end_line(), 1);
        assert_eq!(element.attributes[1].start_line(), 1);
        assert_eq!(element.attributes[1].start_column(), 3);
    }

    #[test]
    fn test_leading_whitespace_stops_at_comment() {
        let source = "<App foo /* note */  bar />";
        let index = LineIndex::new(source);
        let element = Element::from_spans(
            &index,
            0..source.len(),
            &[range_of(source, "foo"), range_of(source, "bar")],
        )
        .unwrap();

        let ws = element.attributes[1].leading_whitespace;
        assert_eq!(&source[ws.range()], "  ");
    }

    #[test]
    fn test_indent_keeps_tabs() {
        let source = "<App\n\tfoo bar\n/>";
        let index = LineIndex::new(source);
        let element = Element::from_spans(
            &index,
            0..source.len(),
            &[range_of(source, "foo"), range_of(source, "bar")],
        )
        .unwrap();

        assert_eq!(element.indent, "\t");
    }

    #[test]
    fn test_indent_spaces_over_tag_text() {
        let source = "\t<App foo />";
        let index = LineIndex::new(source);
        let element = Element::from_spans(&index, 1..source.len(), &[range_of(source, "foo")])
            .unwrap();

        assert_eq!(element.indent, "\t     ");
    }

    #[test]
    fn test_new_indents_with_spaces() {
        let source = "<App foo />";
        let index = LineIndex::new(source);
        let element = Element::from_spans(&index, 0..source.len(), &[5..8]).unwrap();
        let rebuilt = Element::new(element.span, element.attributes.clone());

        assert_eq!(rebuilt.indent, "     ");
        assert_eq!(rebuilt, element);
    }

    #[test]
    fn test_from_spans_no_attributes() {
        let source = "<App />";
        let element = Element::from_spans(&LineIndex::new(source), 0..source.len(), &[]).unwrap();
        assert!(element.is_empty());
    }

    // ==================== Input shape errors ====================

    #[test]
    fn test_rejects_out_of_bounds() {
        let source = "<App foo />";
        let result = Element::from_spans(&LineIndex::new(source), 0..source.len(), &[5..40]);
        assert!(matches!(result, Err(IngestError::SpanOutOfBounds { .. })));
    }

    #[test]
    fn test_rejects_inverted_span() {
        let source = "<App foo />";
        let result = Element::from_spans(&LineIndex::new(source), 8..2, &[]);
        assert_eq!(result, Err(IngestError::InvertedSpan { start: 8, end: 2 }));
    }

    #[test]
    fn test_rejects_attribute_outside_tag() {
        let source = "<App foo /> bar";
        let result = Element::from_spans(&LineIndex::new(source), 0..11, &[12..15]);
        assert!(matches!(result, Err(IngestError::OutsideElement { .. })));
    }

    #[test]
    fn test_rejects_out_of_order_attributes() {
        let source = "<App foo bar />";
        let result = Element::from_spans(&LineIndex::new(source), 0..source.len(), &[9..12, 5..8]);
        assert_eq!(
            result,
            Err(IngestError::OutOfOrder {
                start: 5,
                previous_end: 12
            })
        );
    }

    #[test]
    fn test_rejects_empty_and_malformed() {
        let source = "<App {foo} />";
        let index = LineIndex::new(source);

        assert_eq!(
            Element::from_spans(&index, 0..source.len(), &[5..5]),
            Err(IngestError::EmptyAttribute(5))
        );
        assert!(matches!(
            Element::from_spans(&index, 0..source.len(), &[5..10]),
            Err(IngestError::Malformed { offset: 5, .. })
        ));
    }

    fn tag(source: &str, range: Range<usize>) -> Element {
        Element::from_spans(&LineIndex::new(source), range, &[]).unwrap()
    }

    #[test]
    fn test_disjoint_and_nested_elements() {
        let source = "<App render={<Child />} /><Next />";
        let elements = [tag(source, 13..22), tag(source, 0..26), tag(source, 26..34)];
        assert_eq!(check_disjoint(&elements), Ok(()));
        assert_eq!(check_disjoint(&[]), Ok(()));
    }

    #[test]
    fn test_rejects_repeated_element() {
        let source = "<App {...a}{...b} />";
        let elements = [tag(source, 0..20), tag(source, 0..20)];
        assert_eq!(
            check_disjoint(&elements),
            Err(IngestError::OverlappingElements {
                start: 0,
                end: 20,
                other_start: 0,
                other_end: 20,
            })
        );
    }

    #[test]
    fn test_rejects_crossing_elements() {
        let source = "<App foo /><Next />";
        let elements = [tag(source, 5..15), tag(source, 0..11)];
        assert!(matches!(
            check_disjoint(&elements),
            Err(IngestError::OverlappingElements { start: 5, .. })
        ));
    }

    #[test]
    fn test_rejects_split_character() {
        let source = "<App é />";
        let result = Element::from_spans(&LineIndex::new(source), 0..source.len(), &[5..6]);
        assert_eq!(result, Err(IngestError::NotCharBoundary(6)));
    }
}
