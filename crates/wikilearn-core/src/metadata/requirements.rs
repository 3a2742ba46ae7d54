//! Requirements file reader.

use std::path::Path;

use anyhow::Context;

/// Read a requirements file, one declaration per line.
pub fn load_requirements(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read requirements file: {}", path.display()))?;
    Ok(parse_requirements(&content))
}

/// Trimmed, non-empty lines that do not start with `#`, in file order.
pub fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
