pub mod cli;
pub mod docs;
pub mod error;

pub use docs::render_conf::{load, render_file, render_str, render_value, RenderOptions};
pub use docs::tagged::{
    diagnostic_line, extract, extract_from_reader, extract_from_str, extract_with, ExtractOptions,
    TagMatcher, TaggedRegion,
};
pub use error::{DocToolError, Result};

/// Default configuration file read by `render-conf`
pub const DEFAULT_CONFIG_PATH: &str = "conf.yaml";
