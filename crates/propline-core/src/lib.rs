//! propline-core: Core abstractions for JSX attribute re-wrapping
//!
//! This crate provides:
//! - `Span`/`Position`: byte spans with zero-based line/column positions
//! - `LineIndex`: offset to line/column lookup over one source file
//! - `Element`/`Attribute`: opening tags and their attributes, built from
//!   parser-supplied byte spans
//! - `Edit`: A span-based code modification
//! - `apply_edits()`: Function to apply a batch of edits

mod edit;
pub mod jsx;
mod span;

pub use edit::{apply_edits, Edit, EditError};
pub use jsx::{check_disjoint, Attribute, AttributeName, Element, IngestError};
pub use span::{LineIndex, Position, Span};
