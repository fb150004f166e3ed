use std::fmt;

use crate::blocks::{ArgKind, BlockSpec};
use crate::vocabulary::Vocabulary;

/// Bracket pair an argument is written with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `[text]`, `[choice v]`
    Square,
    /// `(10)`, `(choice v)`, `(x position)`
    Round,
    /// `<>`, `<mouse down?>`
    Angle,
}

impl Bracket {
    pub fn open(self) -> char {
        match self {
            Bracket::Square => '[',
            Bracket::Round => '(',
            Bracket::Angle => '<',
        }
    }

    pub fn close(self) -> char {
        match self {
            Bracket::Square => ']',
            Bracket::Round => ')',
            Bracket::Angle => '>',
        }
    }
}

/// Shape classifier of an input slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    String,
    Number,
    Dropdown,
    NumberDropdown,
    Boolean,
    Color,
}

/// The closed set of shapes that denote a fixed-choice slot
pub const DROPDOWN_SHAPES: [InputShape; 2] = [InputShape::Dropdown, InputShape::NumberDropdown];

impl InputShape {
    pub fn is_dropdown(self) -> bool {
        DROPDOWN_SHAPES.contains(&self)
    }
}

/// Display text of a dropdown slot, kept apart from the slot value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub value: String,
}

impl Label {
    pub fn new(value: &str) -> Self {
        Label {
            value: value.to_string(),
        }
    }
}

/// A literal argument slot
///
/// `menu` caches the literal exactly as it was written in the source, so code
/// that rewrites `value` can still key on the original choice afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub bracket: Bracket,
    pub shape: InputShape,
    pub value: String,
    /// Selector-arrow marker as written, including its leading whitespace (`" v"`)
    pub arrow: Option<String>,
    pub menu: Option<String>,
    pub label: Option<Label>,
}

impl Input {
    pub fn new(bracket: Bracket, shape: InputShape, value: &str) -> Self {
        Input {
            bracket,
            shape,
            value: value.to_string(),
            arrow: None,
            menu: None,
            label: None,
        }
    }

    pub fn with_arrow(mut self, marker: &str) -> Self {
        self.arrow = Some(marker.to_string());
        self
    }

    pub fn has_arrow(&self) -> bool {
        self.arrow.is_some()
    }

    /// A slot is a dropdown if its shape says so. The selector-arrow marker is
    /// honoured as a fallback for slots whose shape was resolved to free text.
    pub fn is_dropdown(&self) -> bool {
        self.shape.is_dropdown() || self.has_arrow()
    }

    /// The value this slot held before any rewrite
    pub fn original_value(&self) -> &str {
        self.menu.as_deref().unwrap_or(&self.value)
    }

    pub fn display_value(&self) -> &str {
        self.label
            .as_ref()
            .map(|label| label.value.as_str())
            .unwrap_or(&self.value)
    }

    /// Overwrite the slot value together with its display label
    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        if let Some(label) = self.label.as_mut() {
            label.value = value.to_string();
        }
    }

    /// Adjust the shape to the kind the matched canonical slot expects
    pub(crate) fn retype(&mut self, kind: ArgKind) {
        match kind {
            ArgKind::Menu | ArgKind::NumberMenu => {
                if self.shape == InputShape::String {
                    self.shape = kind.shape();
                }
            }
            ArgKind::Text | ArgKind::Number => {
                if self.shape.is_dropdown() {
                    self.shape = kind.shape();
                }
            }
            ArgKind::Boolean | ArgKind::Color => {}
        }
    }

    pub(crate) fn capture_menu(&mut self) {
        if self.is_dropdown() {
            self.menu = Some(self.value.clone());
            self.label = Some(Label::new(&self.value));
        }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.bracket.open(),
            self.display_value(),
            self.arrow.as_deref().unwrap_or(""),
            self.bracket.close()
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Input(Input),
    /// A reporter or predicate block nested in an argument position
    Block { bracket: Bracket, block: Box<Block> },
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Input(input) => write!(f, "{}", input),
            Argument::Block { bracket, block } => {
                write!(f, "{}{}{}", bracket.open(), block, bracket.close())
            }
        }
    }
}

/// Piece of a block label: literal text or a reference to an argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Slot(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub indent: String,
    pub label: Vec<Fragment>,
    /// Arguments in canonical slot order once the block is matched,
    /// in textual order otherwise
    pub args: Vec<Argument>,
    /// Trailing whitespace and `//` comment
    pub trailing: String,
    pub spec: Option<&'static BlockSpec>,
}

impl Block {
    pub fn new(label: Vec<Fragment>, args: Vec<Argument>) -> Self {
        Block {
            indent: String::new(),
            label,
            args,
            trailing: String::new(),
            spec: None,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.spec.is_some()
    }

    /// Rewrite the label with the vocabulary's template for this block.
    /// Unmatched blocks and blocks the vocabulary has no entry for keep their text.
    pub fn translate(&mut self, vocabulary: &Vocabulary) {
        if let Some(template) = self
            .spec
            .and_then(|spec| vocabulary.template(spec.spec))
        {
            self.label = template.to_vec();
        }
        for arg in &mut self.args {
            if let Argument::Block { block, .. } = arg {
                block.translate(vocabulary);
            }
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.indent)?;
        for fragment in &self.label {
            match fragment {
                Fragment::Text(text) => f.write_str(text)?,
                Fragment::Slot(index) => {
                    if let Some(arg) = self.args.get(*index) {
                        write!(f, "{}", arg)?;
                    }
                }
            }
        }
        f.write_str(&self.trailing)
    }
}

/// Consecutive non-blank lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Script {
    /// Blank lines preceding the script, verbatim
    pub leading: Vec<String>,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub scripts: Vec<Script>,
    /// Blank lines after the last script
    pub trailing: Vec<String>,
}

impl Document {
    pub fn translate(&mut self, vocabulary: &Vocabulary) {
        for script in &mut self.scripts {
            for block in &mut script.blocks {
                block.translate(vocabulary);
            }
        }
    }

    pub fn stringify(&self) -> String {
        self.to_string()
    }

    pub fn block_count(&self) -> usize {
        self.scripts.iter().map(|script| script.blocks.len()).sum()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut line = |f: &mut fmt::Formatter<'_>, text: &dyn fmt::Display| {
            if !first {
                f.write_str("\n")?;
            }
            first = false;
            write!(f, "{}", text)
        };
        for script in &self.scripts {
            for blank in &script.leading {
                line(f, blank)?;
            }
            for block in &script.blocks {
                line(f, block)?;
            }
        }
        for blank in &self.trailing {
            line(f, blank)?;
        }
        Ok(())
    }
}

/// Split a template such as `"%1 歩動かす"` into label fragments.
/// `%1`..`%9` become zero-based slots; any other `%` is literal text.
pub fn parse_template(template: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '%' {
            if let Some(digit) = chars.peek().and_then(|next| next.to_digit(10)) {
                if digit > 0 {
                    chars.next();
                    if !text.is_empty() {
                        fragments.push(Fragment::Text(std::mem::take(&mut text)));
                    }
                    fragments.push(Fragment::Slot(digit as usize - 1));
                    continue;
                }
            }
        }
        text.push(ch);
    }

    if !text.is_empty() {
        fragments.push(Fragment::Text(text));
    }
    fragments
}

pub fn count_slots(template: &str) -> usize {
    slot_order(&parse_template(template)).len()
}

/// Slot indices in the order they appear in the label
pub fn slot_order(fragments: &[Fragment]) -> Vec<usize> {
    fragments
        .iter()
        .filter_map(|fragment| match fragment {
            Fragment::Slot(index) => Some(*index),
            Fragment::Text(_) => None,
        })
        .collect()
}

/// Normalized matching key of a label: lowercased words joined by single
/// spaces, each argument replaced by `_`.
pub fn label_hash(fragments: &[Fragment]) -> String {
    let mut words: Vec<String> = Vec::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => words.extend(text.split_whitespace().map(str::to_lowercase)),
            Fragment::Slot(_) => words.push("_".to_string()),
        }
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_slots_and_text() {
        assert_eq!(
            parse_template("%1 歩動かす"),
            vec![Fragment::Slot(0), Fragment::Text(" 歩動かす".to_string())]
        );
        assert_eq!(
            parse_template("set size to %1 %"),
            vec![
                Fragment::Text("set size to ".to_string()),
                Fragment::Slot(0),
                Fragment::Text(" %".to_string()),
            ]
        );
    }

    #[test]
    fn test_label_hash_ignores_spacing_and_case() {
        let parsed = vec![
            Fragment::Text("Touching ".to_string()),
            Fragment::Slot(0),
            Fragment::Text("?".to_string()),
        ];
        assert_eq!(label_hash(&parsed), "touching _ ?");
        assert_eq!(label_hash(&parse_template("touching %1?")), "touching _ ?");
    }

    #[test]
    fn test_dropdown_classification() {
        let shaped = Input::new(Bracket::Square, InputShape::Dropdown, "edge");
        assert!(shaped.is_dropdown());

        let flagged = Input::new(Bracket::Square, InputShape::String, "edge").with_arrow(" v");
        assert!(flagged.is_dropdown());

        let text = Input::new(Bracket::Square, InputShape::String, "Hello!");
        assert!(!text.is_dropdown());

        let number = Input::new(Bracket::Round, InputShape::Number, "90");
        assert!(!number.is_dropdown());
    }

    #[test]
    fn test_set_value_updates_label() {
        let mut input = Input::new(Bracket::Square, InputShape::Dropdown, "edge").with_arrow(" v");
        input.capture_menu();
        input.set_value("端");
        assert_eq!(input.value, "端");
        assert_eq!(input.original_value(), "edge");
        assert_eq!(input.to_string(), "[端 v]");
    }

    #[test]
    fn test_original_value_falls_back_to_value() {
        let input = Input::new(Bracket::Round, InputShape::NumberDropdown, "10");
        assert_eq!(input.original_value(), "10");
    }

    #[test]
    fn test_block_display_uses_slots() {
        let block = Block::new(
            vec![
                Fragment::Text("move ".to_string()),
                Fragment::Slot(0),
                Fragment::Text(" steps".to_string()),
            ],
            vec![Argument::Input(Input::new(
                Bracket::Round,
                InputShape::Number,
                "10",
            ))],
        );
        assert_eq!(block.to_string(), "move (10) steps");
    }
}
