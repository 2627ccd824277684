//! Partitioning an element's attributes into line groups

use propline_core::Attribute;

/// A run of consecutive attributes that share one source line
///
/// An attribute joins the running group when it starts on the line where
/// the previous attribute ends, so `foo={{\n}} bar` is a single group
/// whose first attribute spans two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineGroup<'a> {
    attributes: &'a [Attribute],
}

impl<'a> LineGroup<'a> {
    pub fn attributes(&self) -> &'a [Attribute] {
        self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Always false for groups built by [`group_by_line`]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn first(&self) -> &'a Attribute {
        &self.attributes[0]
    }

    /// Line the group starts on
    pub fn line(&self) -> usize {
        self.first().start_line()
    }
}

/// Split attributes into ordered, non-empty line groups
pub fn group_by_line(attributes: &[Attribute]) -> Vec<LineGroup<'_>> {
    attributes
        .chunk_by(|previous, next| next.start_line() == previous.end_line())
        .map(|attributes| LineGroup { attributes })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{element, layout_source};
    use proptest::prelude::*;

    fn names(group: &LineGroup<'_>) -> Vec<String> {
        group
            .attributes()
            .iter()
            .map(|attr| attr.name.to_string())
            .collect()
    }

    #[test]
    fn test_single_line() {
        let element = element("<App foo bar baz />");
        let groups = group_by_line(&element.attributes);

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), ["foo", "bar", "baz"]);
        assert_eq!(groups[0].line(), 0);
    }

    #[test]
    fn test_one_group_per_line() {
        let element = element("<App foo\n  bar baz\n  bor\n/>");
        let groups = group_by_line(&element.attributes);

        assert_eq!(groups.len(), 3);
        assert_eq!(names(&groups[0]), ["foo"]);
        assert_eq!(names(&groups[1]), ["bar", "baz"]);
        assert_eq!(names(&groups[2]), ["bor"]);
        assert_eq!(groups[2].line(), 2);
    }

    #[test]
    fn test_multiline_value_continues_group() {
        let element = element("<App\n  foo={{\n  }} bar baz\n/>");
        let groups = group_by_line(&element.attributes);

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), ["foo", "bar", "baz"]);
        assert_eq!(groups[0].line(), 1);
    }

    #[test]
    fn test_multiline_spreads_chain() {
        let element = element("<App {\n  ...this.props\n} {\n  ...rest\n} />");
        let groups = group_by_line(&element.attributes);

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), ["this.props", "rest"]);
    }

    #[test]
    fn test_multiline_value_alone_on_its_lines() {
        let element = element("<App\n  foo={{\n  }}\n  bar\n/>");
        let groups = group_by_line(&element.attributes);

        assert_eq!(groups.len(), 2);
        assert_eq!(names(&groups[0]), ["foo"]);
        assert_eq!(names(&groups[1]), ["bar"]);
    }

    #[test]
    fn test_no_attributes() {
        let element = element("<App />");
        assert!(group_by_line(&element.attributes).is_empty());
    }

    proptest! {
        #[test]
        fn prop_grouping_is_lossless(lines in prop::collection::vec(1usize..5, 1..6)) {
            let element = element(&layout_source(&lines));
            let groups = group_by_line(&element.attributes);

            let flattened: Vec<_> = groups
                .iter()
                .flat_map(|group| group.attributes().iter().cloned())
                .collect();
            prop_assert_eq!(&flattened, &element.attributes);

            let sizes: Vec<usize> = groups.iter().map(|group| group.len()).collect();
            prop_assert_eq!(sizes, lines);
            prop_assert!(groups.iter().all(|group| !group.is_empty()));
        }
    }
}
