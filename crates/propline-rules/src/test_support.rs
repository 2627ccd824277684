//! Test fixtures: locate opening tags and attribute spans in JSX snippets
//!
//! Only understands what the fixtures use: bare names, `name="..."`,
//! `name={...}` with balanced braces, and `{...spread}`.

use propline_core::{Element, LineIndex};
use std::ops::Range;

/// Every opening tag in `source`
pub(crate) fn elements(source: &str) -> Vec<Element> {
    let index = LineIndex::new(source);
    let bytes = source.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let (end, attributes) = scan_tag(bytes, i);
            found.push(Element::from_spans(&index, i..end, &attributes).unwrap());
            i = end;
        } else {
            i += 1;
        }
    }

    found
}

/// The first opening tag in `source`
pub(crate) fn element(source: &str) -> Element {
    elements(source).into_iter().next().unwrap()
}

/// A multi-line `<App ... />` with `lines[n]` attributes on its n-th line
pub(crate) fn layout_source(lines: &[usize]) -> String {
    let mut source = String::from("<App");
    let mut counter = 0;

    for &count in lines {
        source.push_str("\n ");
        for _ in 0..count {
            source.push_str(&format!(" a{counter}"));
            counter += 1;
        }
    }

    source.push_str("\n/>");
    source
}

fn scan_tag(bytes: &[u8], start: usize) -> (usize, Vec<Range<usize>>) {
    let mut i = start + 1;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !at_tag_end(bytes, i) {
        i += 1;
    }

    let mut attributes = Vec::new();
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }

        match bytes.get(i) {
            None => return (i, attributes),
            Some(b'>') => return (i + 1, attributes),
            Some(b'/') if bytes.get(i + 1) == Some(&b'>') => return (i + 2, attributes),
            Some(b'{') => {
                let end = skip_braces(bytes, i);
                attributes.push(i..end);
                i = end;
            }
            Some(_) => {
                let attr_start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && bytes[i] != b'='
                    && !at_tag_end(bytes, i)
                {
                    i += 1;
                }
                if bytes.get(i) == Some(&b'=') {
                    i += 1;
                    match bytes.get(i) {
                        Some(b'{') => i = skip_braces(bytes, i),
                        Some(&quote @ (b'"' | b'\'')) => {
                            i += 1;
                            while i < bytes.len() && bytes[i] != quote {
                                i += 1;
                            }
                            i = (i + 1).min(bytes.len());
                        }
                        _ => {}
                    }
                }
                if i == attr_start {
                    i += 1;
                    continue;
                }
                attributes.push(attr_start..i);
            }
        }
    }
}

fn at_tag_end(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'>' || (bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>'))
}

fn skip_braces(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, &b) in bytes[start..].iter().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return start + offset + 1;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_finds_spans() {
        let source = "<App foo bar={{\n}} {...rest} baz=\"x y\" />;";
        let element = element(source);
        let texts: Vec<&str> = element
            .attributes
            .iter()
            .map(|attr| &source[attr.span.range()])
            .collect();

        assert_eq!(texts, ["foo", "bar={{\n}}", "{...rest}", "baz=\"x y\""]);
        assert_eq!(&source[element.span.range()], &source[..source.len() - 1]);
    }

    #[test]
    fn test_layout_source() {
        assert_eq!(layout_source(&[1, 2]), "<App\n  a0\n  a1 a2\n/>");
    }
}
