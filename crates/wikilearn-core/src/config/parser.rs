//! TOML parser with helpful error messages

use super::schema::WikilearnConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse wikilearn.toml with detailed error messages
pub fn parse_wikilearn_toml(path: &Path) -> Result<WikilearnConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_wikilearn_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse wikilearn.toml content from string
pub fn parse_wikilearn_toml_str(content: &str) -> Result<WikilearnConfig> {
    let config: WikilearnConfig =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    config.validate()?;

    Ok(config)
}

/// Enhance TOML parsing errors with the offending lines
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let line_hint = error
        .span()
        .map(|span| content[..span.start.min(content.len())].matches('\n').count() + 1);

    if let Some(line_num) = line_hint {
        let context = get_line_context(content, line_num);
        anyhow::anyhow!(
            "TOML parsing error at line {}:\n{}\n\nError: {}",
            line_num,
            context,
            error.message()
        )
    } else {
        anyhow::anyhow!("TOML parsing error: {}", error.message())
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2).min(lines.len());
    let end = (line_num + 1).min(lines.len());

    lines[start..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a configuration to TOML string
pub fn to_toml(config: &WikilearnConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config to TOML")
}
