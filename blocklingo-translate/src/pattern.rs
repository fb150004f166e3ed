//! Text-level dropdown substitution
//!
//! Rewrites bracketed literals such as `[edge v]` or `(edge)` directly in the
//! serialized notation. It cannot tell a dropdown from a free-text slot that
//! happens to hold the same word, so the tree strategy is the default.

use std::borrow::Cow;
use std::collections::HashMap;

use blocklingo::Document;
use regex::{Captures, Regex};
use tracing::{trace, warn};

use crate::mapping::DropdownMap;
use crate::translator::DropdownTranslator;

/// Optional selector-arrow marker between a literal and its closing bracket
const ARROW: &str = r"(\s+v\s*)?";

/// One compiled substitution for a single map key
#[derive(Debug, Clone)]
pub struct PatternRule {
    source: String,
    target: String,
    square: Regex,
    round: Regex,
}

impl PatternRule {
    pub fn new(source: &str, target: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(source);
        Ok(PatternRule {
            source: source.to_string(),
            target: target.to_string(),
            square: Regex::new(&format!(r"(\[){}{}(\])", escaped, ARROW))?,
            round: Regex::new(&format!(r"(\(){}{}(\))", escaped, ARROW))?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Replace every bracketed occurrence of the key, square form first
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let replace = |caps: &Captures| {
            format!(
                "{}{}{}{}",
                &caps[1],
                self.target,
                caps.get(2).map_or("", |m| m.as_str()),
                &caps[3]
            )
        };
        match self.square.replace_all(text, replace) {
            Cow::Borrowed(text) => self.round.replace_all(text, replace),
            Cow::Owned(text) => Cow::Owned(self.round.replace_all(&text, replace).into_owned()),
        }
    }
}

/// Compile rules for every non-empty key, longest key first.
///
/// Keys of equal length are ordered lexically so the result does not depend
/// on map iteration order.
pub(crate) fn compile_rules(entries: &HashMap<String, String>) -> Vec<PatternRule> {
    let mut keys: Vec<&String> = entries.keys().filter(|key| !key.is_empty()).collect();
    keys.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });

    keys.into_iter()
        .filter_map(|key| match PatternRule::new(key, &entries[key]) {
            Ok(rule) => Some(rule),
            Err(e) => {
                warn!(key = %key, error = %e, "Skipping dropdown key that does not compile");
                None
            }
        })
        .collect()
}

/// Apply every rule of `dropdowns` to `text`, one pass per key
pub fn substitute_text(text: &str, dropdowns: &DropdownMap) -> String {
    let mut result = text.to_string();
    for rule in dropdowns.pattern_rules() {
        if let Cow::Owned(replaced) = rule.apply(&result) {
            trace!(source = rule.source(), target = rule.target(), "Substituted dropdown literal");
            result = replaced;
        }
    }
    result
}

/// Substitutes over the serialized document text
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternTranslator;

impl DropdownTranslator for PatternTranslator {
    fn translate_document(&self, document: &mut Document, dropdowns: &DropdownMap) -> String {
        substitute_text(&document.stringify(), dropdowns)
    }

    fn strategy_name(&self) -> &str {
        "pattern"
    }
}
