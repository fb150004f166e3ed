//! Structure-aware dropdown substitution
//!
//! Only slots the parser classified as dropdowns are rewritten, and the
//! lookup always uses the literal as it was first parsed. Free text that
//! happens to match a map key is left alone, and running the walk twice has
//! no further effect.

use blocklingo::{Argument, Block, Document};
use tracing::debug;

use crate::mapping::DropdownMap;
use crate::translator::DropdownTranslator;

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeTranslator;

impl DropdownTranslator for TreeTranslator {
    fn translate_document(&self, document: &mut Document, dropdowns: &DropdownMap) -> String {
        let rewritten = substitute_document(document, dropdowns);
        debug!(rewritten, "Translated dropdown slots");
        document.stringify()
    }

    fn strategy_name(&self) -> &str {
        "tree"
    }
}

/// Rewrite every dropdown slot in `document` found in `dropdowns`.
/// Returns the number of slots rewritten.
pub fn substitute_document(document: &mut Document, dropdowns: &DropdownMap) -> usize {
    if dropdowns.is_empty() {
        return 0;
    }
    document
        .scripts
        .iter_mut()
        .flat_map(|script| script.blocks.iter_mut())
        .map(|block| substitute_block(block, dropdowns))
        .sum()
}

fn substitute_block(block: &mut Block, dropdowns: &DropdownMap) -> usize {
    let mut rewritten = 0;
    for arg in &mut block.args {
        match arg {
            Argument::Input(input) if input.is_dropdown() => {
                if let Some(target) = dropdowns.get(input.original_value()) {
                    input.set_value(target);
                    rewritten += 1;
                }
            }
            Argument::Input(_) => {}
            Argument::Block { block, .. } => rewritten += substitute_block(block, dropdowns),
        }
    }
    rewritten
}
