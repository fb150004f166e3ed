//! Dropdown-aware translation of Scratch block notation
//!
//! Block text is translated by the vocabularies of the `blocklingo` crate.
//! This crate adds the second half: the literal values chosen in dropdown
//! menus (`[random position v]`, `[edge v]`) are looked up in a mapping table
//! and rewritten for the target language.
//!
//! # Workflow Example
//!
//! ```ignore
//! use std::path::Path;
//! use blocklingo::load_all_vocabularies_from_dir;
//! use blocklingo_translate::{Direction, MappingTable, Pipeline, Strategy};
//!
//! let direction: Direction = "en-to-ja".parse()?;
//! let vocabularies = load_all_vocabularies_from_dir(Path::new("data/locales"))?;
//! let table = MappingTable::from_file(Path::new("data/dropdown_map.json"), &direction)?;
//!
//! let translator = Strategy::Tree.translator();
//! let pipeline = Pipeline::new(&vocabularies, &table, translator.as_ref());
//! let output = pipeline.translate("go to [random position v]", &direction)?;
//! assert_eq!(output, "[どこかの場所 v] へ行く");
//! ```

pub mod direction;
pub mod error;
pub mod mapping;
pub mod pattern;
pub mod pipeline;
pub mod translator;
pub mod tree;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

// Re-export main types for convenient access
pub use direction::{Direction, normalize_locale};
pub use error::{TranslateError, TranslateResult};
pub use mapping::{DropdownMap, MappingTable, build_maps, load_mapping_file};
pub use pattern::{PatternRule, PatternTranslator, substitute_text};
pub use pipeline::{Pipeline, Stage, TranslationFailure};
pub use translator::{DropdownTranslator, Strategy};
pub use tree::{TreeTranslator, substitute_document};
