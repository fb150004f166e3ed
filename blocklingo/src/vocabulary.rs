//! Command vocabularies
//!
//! A vocabulary maps canonical block specs to the templates one language uses
//! to write them. It also indexes its templates by [`label_hash`] so the
//! parser can recognise blocks written in that language.

use std::collections::HashMap;

use tracing::warn;

use crate::ast::{Fragment, label_hash, parse_template, slot_order};
use crate::blocks::{self, BLOCKS, BlockSpec};

pub const CANONICAL_LOCALE: &str = "en";

#[derive(Debug, Clone)]
struct Commands {
    templates: HashMap<&'static str, Vec<Fragment>>,
    index: HashMap<String, Vec<&'static BlockSpec>>,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    locale: String,
    /// `None` when the locale was loaded without a command table
    commands: Option<Commands>,
}

impl Vocabulary {
    /// A vocabulary with no command table; it is present but not usable as a target
    pub fn new(locale: &str) -> Self {
        Vocabulary {
            locale: locale.to_lowercase(),
            commands: None,
        }
    }

    /// The canonical language, built from the block catalogue itself
    pub fn english() -> Self {
        Self::from_commands(
            CANONICAL_LOCALE,
            BLOCKS
                .iter()
                .map(|block| (block.spec.to_string(), block.spec.to_string())),
        )
    }

    /// Build a vocabulary from `(canonical spec, localized template)` pairs.
    ///
    /// Pairs naming an unknown block, or whose template does not use every
    /// canonical slot exactly once, are skipped. When two templates share a
    /// matching key the first one keeps priority.
    pub fn from_commands<I>(locale: &str, commands: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let locale = locale.to_lowercase();
        let mut templates = HashMap::new();
        let mut index: HashMap<String, Vec<&'static BlockSpec>> = HashMap::new();

        for (spec, localized) in commands {
            let Some(block) = blocks::lookup(&spec) else {
                warn!(locale = %locale, spec = %spec, "Skipping command for unknown block");
                continue;
            };

            let fragments = parse_template(&localized);
            let mut slots = slot_order(&fragments);
            slots.sort_unstable();
            if slots != (0..block.arity()).collect::<Vec<_>>() {
                warn!(
                    locale = %locale,
                    spec = %spec,
                    template = %localized,
                    "Skipping command whose slots do not match the block"
                );
                continue;
            }

            let hash = label_hash(&fragments);
            let candidates = index.entry(hash).or_default();
            if !candidates.contains(&block) {
                candidates.push(block);
            }
            templates.entry(block.spec).or_insert(fragments);
        }

        Vocabulary {
            locale,
            commands: Some(Commands { templates, index }),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn has_commands(&self) -> bool {
        self.commands.is_some()
    }

    pub fn len(&self) -> usize {
        self.commands
            .as_ref()
            .map_or(0, |commands| commands.templates.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Template this language uses for a canonical spec
    pub fn template(&self, spec: &str) -> Option<&[Fragment]> {
        self.commands
            .as_ref()?
            .templates
            .get(spec)
            .map(Vec::as_slice)
    }

    /// Canonical blocks whose template in this language has the given key
    pub fn candidates(&self, hash: &str) -> &[&'static BlockSpec] {
        self.commands
            .as_ref()
            .and_then(|commands| commands.index.get(hash))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Vocabularies keyed by lower-cased locale code. The canonical language is
/// always present unless explicitly replaced.
#[derive(Debug, Clone)]
pub struct Vocabularies(HashMap<String, Vocabulary>);

impl Vocabularies {
    pub fn new() -> Self {
        let mut vocabularies = Vocabularies(HashMap::new());
        vocabularies.insert(Vocabulary::english());
        vocabularies
    }

    pub fn insert(&mut self, vocabulary: Vocabulary) -> &mut Self {
        self.0.insert(vocabulary.locale.clone(), vocabulary);
        self
    }

    pub fn get(&self, locale: &str) -> Option<&Vocabulary> {
        self.0.get(&locale.to_lowercase())
    }

    /// A vocabulary that is loaded and carries a command table
    pub fn available(&self, locale: &str) -> Option<&Vocabulary> {
        self.get(locale).filter(|vocabulary| vocabulary.has_commands())
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.0.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }
}

impl Default for Vocabularies {
    fn default() -> Self {
        Self::new()
    }
}
