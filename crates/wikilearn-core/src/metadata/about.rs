//! Version descriptor reader.
//!
//! The descriptor is a file of single assignments such as
//! `__version__ = "20.0.0"`. It is scanned line by line; nothing in it is
//! evaluated. Lines that are not a dunder name assigned a quoted string are
//! ignored.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

pub const VERSION_KEY: &str = "__version__";

/// Read every `__name__ = "value"` assignment from a descriptor file.
pub fn load_about(path: &Path) -> anyhow::Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read version descriptor: {}", path.display()))?;
    Ok(parse_about(&content))
}

/// Read `__version__` from a descriptor file.
pub fn load_version(path: &Path) -> anyhow::Result<String> {
    let about = load_about(path)?;
    about.get(VERSION_KEY).cloned().ok_or_else(|| {
        anyhow::anyhow!(
            "Version descriptor {} does not define {}",
            path.display(),
            VERSION_KEY
        )
    })
}

/// Collect dunder string assignments. A later assignment overrides an
/// earlier one.
pub fn parse_about(content: &str) -> BTreeMap<String, String> {
    content.lines().filter_map(parse_assignment).collect()
}

fn parse_assignment(line: &str) -> Option<(String, String)> {
    let (name, value) = line.trim().split_once('=')?;
    let name = name.trim();
    if !is_dunder(name) {
        return None;
    }
    let value = parse_string_literal(value.trim())?;
    Some((name.to_string(), value.to_string()))
}

fn is_dunder(name: &str) -> bool {
    name.len() > 4
        && name.starts_with("__")
        && name.ends_with("__")
        && name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// A single- or double-quoted literal, optionally followed by a comment.
fn parse_string_literal(value: &str) -> Option<&str> {
    let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &value[1..];
    let end = body.find(quote)?;
    let rest = body[end + 1..].trim();
    if !rest.is_empty() && !rest.starts_with('#') {
        return None;
    }
    Some(&body[..end])
}
