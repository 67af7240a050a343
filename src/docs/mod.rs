//! Documentation build helpers
//!
//! This module provides the two helpers used while building the docs:
//! a deterministic YAML renderer for checking config edits, and an
//! extractor for `tag::`/`end::` delimited regions of source files.

pub mod render_conf;
pub mod tagged;

pub use render_conf::RenderOptions;
pub use tagged::{ExtractOptions, TagMatcher, TaggedRegion};
