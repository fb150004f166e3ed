use std::fmt;
use std::str::FromStr;

use blocklingo::Document;

use crate::error::TranslateError;
use crate::mapping::DropdownMap;
use crate::pattern::PatternTranslator;
use crate::tree::TreeTranslator;

/// Rewrites dropdown literals in a document whose block text has already
/// been translated, and produces the final text.
///
/// Implementations must leave free-text and numeric slots alone, and applying
/// one twice with the same map must give the same output as applying it once.
pub trait DropdownTranslator: Send + Sync {
    fn translate_document(&self, document: &mut Document, dropdowns: &DropdownMap) -> String;

    /// Name used in logs and configuration
    fn strategy_name(&self) -> &str;
}

/// Selectable dropdown substitution strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Walk the parsed tree and rewrite dropdown slots in place
    #[default]
    Tree,
    /// Regex substitution over the serialized text
    Pattern,
}

impl Strategy {
    pub fn translator(self) -> Box<dyn DropdownTranslator> {
        match self {
            Strategy::Tree => Box::new(TreeTranslator),
            Strategy::Pattern => Box::new(PatternTranslator),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Tree => "tree",
            Strategy::Pattern => "pattern",
        }
    }
}

impl FromStr for Strategy {
    type Err = TranslateError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "tree" => Ok(Strategy::Tree),
            "pattern" => Ok(Strategy::Pattern),
            _ => Err(TranslateError::InvalidStrategy(name.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("tree".parse::<Strategy>().unwrap(), Strategy::Tree);
        assert_eq!("Pattern".parse::<Strategy>().unwrap(), Strategy::Pattern);
        assert!(matches!(
            "regex".parse::<Strategy>(),
            Err(TranslateError::InvalidStrategy(_))
        ));
    }

    #[test]
    fn test_strategy_translator_name() {
        for strategy in [Strategy::Tree, Strategy::Pattern] {
            assert_eq!(strategy.translator().strategy_name(), strategy.as_str());
        }
        assert_eq!(Strategy::default(), Strategy::Tree);
    }
}
