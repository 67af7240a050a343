//! Config round-trip renderer
//!
//! Loads a YAML configuration and prints it back in a canonical form so that
//! two revisions of the file can be compared with `diff`. Anchors and aliases
//! are expanded in place, so configs that differ only in how they share
//! structure render identically.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{DocToolError, Result};

/// Serializer configuration, passed to every render call.
///
/// Aliases are always expanded: the parser resolves them to full copies and
/// the serializer never emits anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Resolve `<<` merge keys before rendering
    pub merge_keys: bool,
    /// Sort mapping keys recursively instead of keeping document order
    pub sort_keys: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            merge_keys: true,
            sort_keys: false,
        }
    }
}

/// Read and parse a YAML file into a plain data tree.
pub fn load(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| DocToolError::io(path, e))?;
    let value: Value = serde_yaml::from_str(&content)?;
    debug!(path = %path.display(), bytes = content.len(), "Loaded config");
    Ok(value)
}

/// Render an already parsed document.
pub fn render_value(value: &Value, options: &RenderOptions) -> Result<String> {
    let mut value = value.clone();
    if options.merge_keys {
        value.apply_merge()?;
    }
    if options.sort_keys {
        sort_mappings(&mut value);
    }
    Ok(serde_yaml::to_string(&value)?)
}

/// Parse YAML text and render it.
pub fn render_str(source: &str, options: &RenderOptions) -> Result<String> {
    let value: Value = serde_yaml::from_str(source)?;
    render_value(&value, options)
}

/// Load a YAML file and render it.
pub fn render_file(path: &Path, options: &RenderOptions) -> Result<String> {
    let value = load(path)?;
    render_value(&value, options)
}

fn sort_mappings(value: &mut Value) {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(Value, Value)> = std::mem::take(mapping).into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));
            for (_, child) in entries.iter_mut() {
                sort_mappings(child);
            }
            *mapping = entries.into_iter().collect::<Mapping>();
        }
        Value::Sequence(items) => items.iter_mut().for_each(sort_mappings),
        Value::Tagged(tagged) => sort_mappings(&mut tagged.value),
        _ => {}
    }
}

/// Keys order by kind first (null, bool, number, string, other), then by value.
fn compare_keys(a: &Value, b: &Value) -> Ordering {
    fn rank(value: &Value) -> u8 {
        match value {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => 4,
        }
    }

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => rank(a)
            .cmp(&rank(b))
            .then_with(|| format!("{a:?}").cmp(&format!("{b:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALIASED: &str = r#"
defaults: &defaults
  timeout: 30
  retries: 3
services:
  api: *defaults
  worker: *defaults
"#;

    #[test]
    fn test_aliases_are_expanded() {
        let rendered = render_str(ALIASED, &RenderOptions::default()).unwrap();

        assert!(!rendered.contains('&'));
        assert!(!rendered.contains('*'));
        assert_eq!(rendered.matches("timeout: 30").count(), 3);
    }

    #[test]
    fn test_alias_style_does_not_change_output() {
        let expanded = r#"
defaults:
  timeout: 30
  retries: 3
services:
  api:
    timeout: 30
    retries: 3
  worker:
    timeout: 30
    retries: 3
"#;
        let options = RenderOptions::default();

        assert_eq!(
            render_str(ALIASED, &options).unwrap(),
            render_str(expanded, &options).unwrap()
        );
    }

    #[test]
    fn test_document_order_is_kept() {
        let rendered = render_str("zeta: 1\nalpha: 2\n", &RenderOptions::default()).unwrap();
        assert_eq!(rendered, "zeta: 1\nalpha: 2\n");
    }

    #[test]
    fn test_sort_keys_recurses() {
        let options = RenderOptions {
            sort_keys: true,
            ..Default::default()
        };
        let rendered = render_str("b:\n  y: 1\n  x: 2\na:\n- d: 1\n  c: 2\n", &options).unwrap();

        assert_eq!(rendered, "a:\n- c: 2\n  d: 1\nb:\n  x: 2\n  y: 1\n");
    }

    #[test]
    fn test_sort_keys_orders_numbers_numerically() {
        let options = RenderOptions {
            sort_keys: true,
            ..Default::default()
        };
        let rendered = render_str("10: a\nname: b\n9: c\n-1: d\n2.5: e\n", &options).unwrap();

        assert_eq!(rendered, "-1: d\n2.5: e\n9: c\n10: a\nname: b\n");
    }

    #[test]
    fn test_merge_keys_are_applied() {
        let source = r#"
base: &base
  host: localhost
  port: 80
site:
  <<: *base
  port: 8080
"#;
        let rendered = render_str(source, &RenderOptions::default()).unwrap();
        assert!(!rendered.contains("<<"));

        let reparsed: Value = serde_yaml::from_str(&rendered).unwrap();
        assert_eq!(reparsed["site"]["host"], Value::from("localhost"));
        assert_eq!(reparsed["site"]["port"], Value::from(8080));
    }

    #[test]
    fn test_merge_keys_left_alone_when_disabled() {
        let options = RenderOptions {
            merge_keys: false,
            ..Default::default()
        };
        let rendered = render_str("a: &a {x: 1}\nb:\n  <<: *a\n", &options).unwrap();
        assert!(rendered.contains("<<"));
    }

    #[test]
    fn test_render_is_a_fixed_point() {
        let source = r#"
name: docs
branches: [main, "7.x"]
flags:
  "yes": no
  empty: ""
  multiline: |
    first
    second
shared: &s {a: 1}
again: *s
"#;
        for options in [
            RenderOptions::default(),
            RenderOptions {
                sort_keys: true,
                ..Default::default()
            },
        ] {
            let once = render_str(source, &options).unwrap();
            let twice = render_str(&once, &options).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let err = render_str("key: [unclosed", &RenderOptions::default()).unwrap_err();
        assert!(matches!(err, DocToolError::Yaml(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = render_file(Path::new("does/not/exist.yaml"), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, DocToolError::Io { .. }));
    }
}
