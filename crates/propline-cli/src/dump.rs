//! Element dumps: opening-tag spans produced by an external JSX parser
//!
//! ```json
//! {"source": "App.jsx",
//!  "elements": [{"start": 0, "end": 19, "attributes": [{"start": 5, "end": 8}]}]}
//! ```
//!
//! `source` is resolved against the dump's directory. Offsets are bytes.

use anyhow::{Context, Result};
use propline_core::{check_disjoint, Element, LineIndex};
use serde::Deserialize;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const DUMP_SUFFIX: &str = ".props.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDump {
    pub source: PathBuf,
    #[serde(default)]
    pub elements: Vec<TagSpans>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagSpans {
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub attributes: Vec<ByteRange>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// A dump with its source text loaded
#[derive(Debug)]
pub struct LoadedDump {
    pub source_path: PathBuf,
    pub source: String,
    pub tags: Vec<TagSpans>,
}

/// Whether `path` names an element dump
pub fn is_dump(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(DUMP_SUFFIX))
}

/// Read a dump and the source file it describes
pub fn load(dump_path: &Path) -> Result<LoadedDump> {
    let contents = std::fs::read_to_string(dump_path)
        .with_context(|| format!("Failed to read {}", dump_path.display()))?;
    let dump: ElementDump = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", dump_path.display()))?;

    let source_path = match dump_path.parent() {
        Some(dir) => dir.join(&dump.source),
        None => dump.source,
    };
    let source = std::fs::read_to_string(&source_path)
        .with_context(|| format!("Failed to read file: {}", source_path.display()))?;

    Ok(LoadedDump {
        source_path,
        source,
        tags: dump.elements,
    })
}

impl LoadedDump {
    /// Build the elements, rejecting spans that don't fit the source
    pub fn elements(&self) -> Result<Vec<Element>> {
        let index = LineIndex::new(&self.source);

        let elements = self
            .tags
            .iter()
            .enumerate()
            .map(|(i, tag)| {
                let attributes: Vec<Range<usize>> =
                    tag.attributes.iter().map(|attr| attr.range()).collect();
                Element::from_spans(&index, tag.start..tag.end, &attributes).with_context(|| {
                    format!(
                        "Element #{} ({}..{}) in {}",
                        i, tag.start, tag.end, self.source_path.display()
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        check_disjoint(&elements)
            .with_context(|| format!("Elements of {}", self.source_path.display()))?;

        Ok(elements)
    }
}
