//! Parser configuration.

use serde::{Deserialize, Serialize};

use crate::lexer::LexerOptions;

/// Operator precedence rules the expression grammar follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
    /// Comparison operators share one non-associative level, `IS` binds
    /// looser than comparisons (server versions 9.5 and later).
    #[default]
    Current,
    /// `=` is right-associative and binds looser than `<` and `>`, `IS`,
    /// `ISNULL` and `NOTNULL` bind tighter than generic operators, postfix
    /// operators are recognized.
    Legacy,
}

impl Precedence {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }
}

/// Settings for [`Parser`](super::Parser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub precedence: Precedence,
    pub lexer: LexerOptions,
}

impl ParserConfig {
    /// Configuration for the legacy precedence rules.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            precedence: Precedence::Legacy,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.precedence, Precedence::Current);
        assert!(config.lexer.standard_conforming_strings);
        assert_eq!(ParserConfig::legacy().precedence, Precedence::Legacy);
    }

    #[test]
    fn test_config_from_json() {
        let config: ParserConfig = serde_json::from_str(r#"{"precedence": "legacy"}"#).unwrap();
        assert_eq!(config.precedence, Precedence::Legacy);
        assert!(config.lexer.standard_conforming_strings);

        let config: ParserConfig =
            serde_json::from_str(r#"{"lexer": {"standard_conforming_strings": false}}"#).unwrap();
        assert_eq!(config.precedence, Precedence::Current);
        assert!(!config.lexer.standard_conforming_strings);
    }
}
