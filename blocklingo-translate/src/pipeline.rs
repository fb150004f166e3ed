//! Translation orchestration
//!
//! A request moves through fixed stages: the source text is parsed with the
//! source and target vocabularies, block text is rewritten into the target
//! language, dropdown literals are substituted, and the tree is serialized.
//! Any failure carries a fallback text the caller can show instead.

use std::fmt;

use blocklingo::{Parser, Vocabularies, Vocabulary};
use thiserror::Error;
use tracing::{debug, warn};

use crate::direction::Direction;
use crate::error::TranslateError;
use crate::mapping::{DropdownMap, MappingTable};
use crate::translator::DropdownTranslator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Received,
    Parsed,
    VocabularyTranslated,
    DropdownTranslated,
    Serialized,
    Done,
    ParseFailed,
    VocabularyMissing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Received => "received",
            Stage::Parsed => "parsed",
            Stage::VocabularyTranslated => "vocabulary-translated",
            Stage::DropdownTranslated => "dropdown-translated",
            Stage::Serialized => "serialized",
            Stage::Done => "done",
            Stage::ParseFailed => "parse-failed",
            Stage::VocabularyMissing => "vocabulary-missing",
        };
        f.write_str(name)
    }
}

/// A translation that stopped early
#[derive(Debug, Error)]
#[error("{error} ({stage})")]
pub struct TranslationFailure {
    /// Terminal state the request ended in
    pub stage: Stage,
    #[source]
    pub error: TranslateError,
    /// Best available text: the input, or its re-serialization
    pub fallback: String,
}

/// Composes vocabulary translation with a dropdown strategy
pub struct Pipeline<'a> {
    vocabularies: &'a Vocabularies,
    mappings: &'a MappingTable,
    translator: &'a dyn DropdownTranslator,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        vocabularies: &'a Vocabularies,
        mappings: &'a MappingTable,
        translator: &'a dyn DropdownTranslator,
    ) -> Self {
        Pipeline {
            vocabularies,
            mappings,
            translator,
        }
    }

    pub fn strategy_name(&self) -> &str {
        self.translator.strategy_name()
    }

    /// Translate `source_text` in the given direction
    pub fn translate(
        &self,
        source_text: &str,
        direction: &Direction,
    ) -> Result<String, TranslationFailure> {
        debug!(stage = %Stage::Received, direction = %direction, len = source_text.len());

        let languages = self.parse_languages(direction);
        let mut document = Parser::new(source_text)
            .with_languages(&languages)
            .parse()
            .map_err(|source| TranslationFailure {
                stage: Stage::ParseFailed,
                error: TranslateError::ParseFailure {
                    locale: direction.source().to_string(),
                    source,
                },
                fallback: source_text.to_string(),
            })?;
        debug!(stage = %Stage::Parsed, blocks = document.block_count());

        let Some(target) = self.vocabularies.available(direction.target()) else {
            return Err(TranslationFailure {
                stage: Stage::VocabularyMissing,
                error: TranslateError::VocabularyUnavailable(direction.target().to_string()),
                fallback: document.stringify(),
            });
        };
        document.translate(target);
        debug!(stage = %Stage::VocabularyTranslated, locale = target.locale());

        let empty = DropdownMap::new();
        let dropdowns = self.mappings.for_direction(direction).unwrap_or_else(|| {
            debug!(direction = %direction, "No dropdown mapping for direction");
            &empty
        });
        let output = self.translator.translate_document(&mut document, dropdowns);
        debug!(
            stage = %Stage::DropdownTranslated,
            strategy = self.translator.strategy_name(),
            entries = dropdowns.len()
        );
        debug!(stage = %Stage::Serialized, len = output.len());
        debug!(stage = %Stage::Done, "Translation complete");

        Ok(output)
    }

    /// Source vocabulary first so its templates win ambiguous matches
    fn parse_languages(&self, direction: &Direction) -> Vec<&'a Vocabulary> {
        let mut languages = Vec::with_capacity(2);
        for locale in [direction.source(), direction.target()] {
            match self.vocabularies.available(locale) {
                Some(vocabulary) => {
                    if !languages
                        .iter()
                        .any(|known: &&Vocabulary| known.locale() == vocabulary.locale())
                    {
                        languages.push(vocabulary);
                    }
                }
                None if locale == direction.source() => {
                    warn!(locale = %locale, "Source vocabulary not loaded, parsing with target only");
                }
                None => {}
            }
        }
        languages
    }
}
