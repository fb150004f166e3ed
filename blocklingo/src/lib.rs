//! Block notation for translation
//!
//! This crate reads and writes the plain-text notation of Scratch scripts
//! (`move (10) steps`, `go to [random position v]`) and knows how each block
//! is written in every loaded language.
//!
//! # Example
//!
//! ```ignore
//! use blocklingo::{Parser, Vocabulary};
//!
//! let en = Vocabulary::english();
//! let ja = Vocabulary::from_commands("ja", vec![
//!     ("move %1 steps".to_string(), "%1 歩動かす".to_string()),
//! ]);
//!
//! let mut document = Parser::new("move (10) steps").with_languages(&[&en]).parse()?;
//! document.translate(&ja);
//! assert_eq!(document.stringify(), "(10) 歩動かす");
//! ```

pub mod ast;
pub mod blocks;
pub mod error;
pub mod loader;
pub mod parser;
pub mod vocabulary;

// Re-export tree types for convenient access
pub use ast::{
    Argument, Block, Bracket, DROPDOWN_SHAPES, Document, Fragment, Input, InputShape, Label,
    Script,
};
pub use blocks::{ArgKind, BlockShape, BlockSpec};
pub use error::{LoadError, ParseError, ParseErrorKind};
pub use loader::{load_all_vocabularies_from_dir, load_vocabulary_from_file};
pub use parser::Parser;
pub use vocabulary::{CANONICAL_LOCALE, Vocabularies, Vocabulary};

/// Parse `source` recognising blocks in the given languages, in order
pub fn parse(source: &str, languages: &[&Vocabulary]) -> Result<Document, ParseError> {
    Parser::new(source).with_languages(languages).parse()
}
