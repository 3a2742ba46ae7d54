//! Dependency declaration parsing.

use std::fmt;

use crate::error::PinError;

/// Separator between the repository identifier and its ref.
pub const REF_SEPARATOR: char = '@';

/// A dependency declaration of the form `<repository>@<ref>`.
///
/// The repository is everything before the first `@`; the ref is everything
/// after it and is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    raw: String,
    separator: usize,
}

impl Declaration {
    /// Parse a declaration, failing when it has no ref separator.
    pub fn parse(raw: &str) -> Result<Self, PinError> {
        let separator = raw
            .find(REF_SEPARATOR)
            .ok_or_else(|| PinError::InvalidDependencyFormat {
                declaration: raw.to_string(),
            })?;
        Ok(Self {
            raw: raw.to_string(),
            separator,
        })
    }

    pub fn repository(&self) -> &str {
        &self.raw[..self.separator]
    }

    pub fn reference(&self) -> &str {
        &self.raw[self.separator + REF_SEPARATOR.len_utf8()..]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this declaration tracks the given development branch marker.
    pub fn tracks(&self, marker: &str) -> bool {
        self.reference() == marker
    }

    /// The same repository pinned to another ref.
    pub fn with_reference(&self, reference: &str) -> String {
        format!("{}{}{}", self.repository(), REF_SEPARATOR, reference)
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
