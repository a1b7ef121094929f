//! Output options for [`SqlBuilder`](super::SqlBuilder).

use serde::{Deserialize, Serialize};

/// Which operator precedence rules decide where parentheses go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Parentheses {
    /// Only those required by PostgreSQL 9.5+ precedence.
    #[default]
    Current,
    /// Enough that the output means the same under both the current and the
    /// pre-9.5 precedence.
    Compat,
}

/// Formatting options.
///
/// ```rust
/// use oxide_pgsql_core::builder::BuilderOptions;
///
/// let options: BuilderOptions = serde_json::from_str(r#"{"linebreak": "", "wrap": null}"#).unwrap();
/// assert_eq!(options.indent, "    ");
/// assert!(options.wrap.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// One level of indentation.
    pub indent: String,
    /// Line separator; an empty string puts everything on one line.
    pub linebreak: String,
    /// Target line length for lists, `None` to never wrap.
    pub wrap: Option<usize>,
    pub parentheses: Parentheses,
    /// Write non-ASCII string constants and identifiers with Unicode escapes.
    pub escape_unicode: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            linebreak: "\n".to_string(),
            wrap: Some(120),
            parentheses: Parentheses::Current,
            escape_unicode: false,
        }
    }
}

impl BuilderOptions {
    /// Everything on a single line without wrapping.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent: String::new(),
            linebreak: String::new(),
            wrap: None,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_keep_defaults() {
        let options: BuilderOptions =
            serde_json::from_str(r#"{"parentheses": "compat", "escape_unicode": true}"#).unwrap();
        assert_eq!(options.parentheses, Parentheses::Compat);
        assert!(options.escape_unicode);
        assert_eq!(options.linebreak, "\n");
        assert_eq!(options.wrap, Some(120));
    }

    #[test]
    fn test_unknown_parentheses_mode_is_rejected() {
        assert!(serde_json::from_str::<BuilderOptions>(r#"{"parentheses": "legacy"}"#).is_err());
    }
}
