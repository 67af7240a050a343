//! Tagged region extraction
//!
//! Pulls the lines between a `tag::NAME` marker and the matching `end::NAME`
//! marker out of a source file so they can be included in documentation.
//! The indentation of the start marker is removed from every captured line.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{DocToolError, Result};

/// `// <1>` style callouts left in source comments
static CALLOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*(<\d+>)").expect("callout pattern is valid"));

/// Extraction options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Rewrite `// <N>` comment callouts to bare `<N>`
    pub rewrite_callouts: bool,
}

/// A successfully extracted region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRegion {
    /// Captured lines, de-indented, line terminators preserved
    pub text: String,
    /// Line of the start marker (1-based)
    pub start_line: usize,
    /// Line of the end marker (1-based)
    pub end_line: usize,
}

/// Start and end marker patterns for one tag
#[derive(Debug, Clone)]
pub struct TagMatcher {
    tag: String,
    start: Regex,
    end: Regex,
}

impl TagMatcher {
    pub fn new(tag: &str) -> Result<Self> {
        if tag.is_empty() || tag.chars().any(char::is_whitespace) {
            return Err(DocToolError::InvalidTag(tag.to_string()));
        }

        // A marker ends at whitespace, `[` (as in `tag::name[]`) or end of line
        let escaped = regex::escape(tag);
        let start = Regex::new(&format!(r"^(\s*).+tag::{escaped}(?:[\s\[]|$)"))
            .map_err(|_| DocToolError::InvalidTag(tag.to_string()))?;
        let end = Regex::new(&format!(r"end::{escaped}(?:[\s\[]|$)"))
            .map_err(|_| DocToolError::InvalidTag(tag.to_string()))?;

        Ok(Self {
            tag: tag.to_string(),
            start,
            end,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Indentation in front of the start marker, if `line` is one.
    pub fn start_indent<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.start
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_end(&self, line: &str) -> bool {
        self.end.is_match(line)
    }
}

/// Per-call scan state
#[derive(Debug, Default)]
struct ScanState {
    /// Indentation captured from the start marker; `Some` once inside the region
    indent: Option<String>,
    start_line: usize,
    text: String,
}

enum Step {
    Continue,
    Done,
}

impl ScanState {
    fn feed(
        &mut self,
        matcher: &TagMatcher,
        options: &ExtractOptions,
        line_no: usize,
        line: &str,
    ) -> Step {
        let Some(indent) = self.indent.as_deref() else {
            if let Some(indent) = matcher.start_indent(line) {
                debug!(tag = matcher.tag(), line = line_no, "Found start tag");
                self.indent = Some(indent.to_string());
                self.start_line = line_no;
            }
            return Step::Continue;
        };

        if matcher.is_end(line) {
            return Step::Done;
        }

        let line = line.strip_prefix(indent).unwrap_or(line);
        let line = if options.rewrite_callouts {
            rewrite_callouts(line)
        } else {
            Cow::Borrowed(line)
        };
        self.text.push_str(&line);
        Step::Continue
    }
}

/// Replace `// <N>` with `<N>`.
pub fn rewrite_callouts(line: &str) -> Cow<'_, str> {
    CALLOUT.replace_all(line, "$1")
}

fn scan<R: BufRead>(
    mut reader: R,
    matcher: &TagMatcher,
    options: &ExtractOptions,
    source: &Path,
) -> Result<TaggedRegion> {
    let mut state = ScanState::default();
    let mut line = String::new();
    let mut line_no = 0;

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| DocToolError::io(source, e))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        if let Step::Done = state.feed(matcher, options, line_no, &line) {
            debug!(
                tag = matcher.tag(),
                start = state.start_line,
                end = line_no,
                "Extracted region"
            );
            return Ok(TaggedRegion {
                text: state.text,
                start_line: state.start_line,
                end_line: line_no,
            });
        }
    }

    match state.indent {
        None => Err(DocToolError::TagNotFound(matcher.tag().to_string())),
        Some(_) => Err(DocToolError::UnterminatedTag {
            tag: matcher.tag().to_string(),
            start_line: state.start_line,
        }),
    }
}

/// Extract a tagged region from any buffered reader.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    tag: &str,
    options: &ExtractOptions,
) -> Result<TaggedRegion> {
    let matcher = TagMatcher::new(tag)?;
    scan(reader, &matcher, options, Path::new("<input>"))
}

/// Extract a tagged region from in-memory text.
pub fn extract_from_str(source: &str, tag: &str, options: &ExtractOptions) -> Result<TaggedRegion> {
    extract_from_reader(source.as_bytes(), tag, options)
}

/// Extract a tagged region from a file.
pub fn extract_with(path: &Path, tag: &str, options: &ExtractOptions) -> Result<TaggedRegion> {
    let matcher = TagMatcher::new(tag)?;
    let file = File::open(path).map_err(|e| DocToolError::io(path, e))?;
    scan(BufReader::new(file), &matcher, options, path)
}

/// Extract a tagged region from a file with default options, returning only the text.
pub fn extract(path: &Path, tag: &str) -> Result<String> {
    extract_with(path, tag, &ExtractOptions::default()).map(|region| region.text)
}

/// Diagnostic line printed by the CLI when extraction fails.
pub fn diagnostic_line(file: &Path, tag: &str, err: &DocToolError) -> String {
    format!(
        "asciidoc: ERROR: Extracting tag '{}' from file '{}': {}",
        tag,
        file.display(),
        err
    )
}
