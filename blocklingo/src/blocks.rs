//! Canonical block catalogue
//!
//! Every block the translator understands is identified by its English spec,
//! written with numbered slots (`%1`, `%2`, ...). Localized vocabularies map
//! these specs to their own templates, so the spec string is the
//! language-neutral key shared by all locales.

use crate::ast::InputShape;

/// Outer shape of a block, used to prefer matches that fit their bracket context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockShape {
    Hat,
    Stack,
    /// C-shaped block that wraps a substack (`forever`, `if <> then`)
    CBlock,
    Cap,
    Reporter,
    Boolean,
    /// Structural keywords such as `else` and `end`
    Keyword,
}

impl BlockShape {
    /// Whether a block of this shape can appear inside round brackets
    pub fn fits_round(self) -> bool {
        self == BlockShape::Reporter
    }

    /// Whether a block of this shape can appear inside angle brackets
    pub fn fits_angle(self) -> bool {
        self == BlockShape::Boolean
    }

    /// Whether a block of this shape can stand on its own line
    pub fn fits_line(self) -> bool {
        !matches!(self, BlockShape::Reporter | BlockShape::Boolean)
    }
}

/// Kind of value a canonical slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Text,
    Number,
    /// Closed-choice menu rendered with square brackets
    Menu,
    /// Closed-choice menu rendered with round brackets
    NumberMenu,
    Boolean,
    Color,
}

impl ArgKind {
    pub fn shape(self) -> InputShape {
        match self {
            ArgKind::Text => InputShape::String,
            ArgKind::Number => InputShape::Number,
            ArgKind::Menu => InputShape::Dropdown,
            ArgKind::NumberMenu => InputShape::NumberDropdown,
            ArgKind::Boolean => InputShape::Boolean,
            ArgKind::Color => InputShape::Color,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct BlockSpec {
    pub spec: &'static str,
    pub shape: BlockShape,
    pub args: &'static [ArgKind],
}

impl BlockSpec {
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

macro_rules! block {
    ($spec:expr, $shape:ident) => {
        BlockSpec { spec: $spec, shape: BlockShape::$shape, args: &[] }
    };
    ($spec:expr, $shape:ident, [$($arg:ident),+]) => {
        BlockSpec {
            spec: $spec,
            shape: BlockShape::$shape,
            args: &[$(ArgKind::$arg),+],
        }
    };
}

pub static BLOCKS: &[BlockSpec] = &[
    // Motion
    block!("move %1 steps", Stack, [Number]),
    block!("turn @turnRight %1 degrees", Stack, [Number]),
    block!("turn @turnLeft %1 degrees", Stack, [Number]),
    block!("go to %1", Stack, [Menu]),
    block!("go to x: %1 y: %2", Stack, [Number, Number]),
    block!("glide %1 secs to %2", Stack, [Number, Menu]),
    block!("glide %1 secs to x: %2 y: %3", Stack, [Number, Number, Number]),
    block!("point in direction %1", Stack, [Number]),
    block!("point towards %1", Stack, [Menu]),
    block!("change x by %1", Stack, [Number]),
    block!("set x to %1", Stack, [Number]),
    block!("change y by %1", Stack, [Number]),
    block!("set y to %1", Stack, [Number]),
    block!("if on edge, bounce", Stack),
    block!("set rotation style %1", Stack, [Menu]),
    block!("x position", Reporter),
    block!("y position", Reporter),
    block!("direction", Reporter),
    // Looks
    block!("say %1 for %2 seconds", Stack, [Text, Number]),
    block!("say %1 for %2 secs", Stack, [Text, Number]),
    block!("say %1", Stack, [Text]),
    block!("think %1 for %2 seconds", Stack, [Text, Number]),
    block!("think %1 for %2 secs", Stack, [Text, Number]),
    block!("think %1", Stack, [Text]),
    block!("switch costume to %1", Stack, [Menu]),
    block!("next costume", Stack),
    block!("switch backdrop to %1", Stack, [Menu]),
    block!("next backdrop", Stack),
    block!("change size by %1", Stack, [Number]),
    block!("set size to %1 %", Stack, [Number]),
    block!("change %1 effect by %2", Stack, [Menu, Number]),
    block!("set %1 effect to %2", Stack, [Menu, Number]),
    block!("clear graphic effects", Stack),
    block!("show", Stack),
    block!("hide", Stack),
    block!("go to %1 layer", Stack, [Menu]),
    block!("go %1 %2 layers", Stack, [Menu, Number]),
    block!("costume %1", Reporter, [Menu]),
    block!("backdrop %1", Reporter, [Menu]),
    block!("size", Reporter),
    // Sound
    block!("play sound %1 until done", Stack, [Menu]),
    block!("start sound %1", Stack, [Menu]),
    block!("stop all sounds", Stack),
    block!("change volume by %1", Stack, [Number]),
    block!("set volume to %1 %", Stack, [Number]),
    block!("volume", Reporter),
    // Events
    block!("when @greenFlag clicked", Hat),
    block!("when %1 key pressed", Hat, [Menu]),
    block!("when this sprite clicked", Hat),
    block!("when backdrop switches to %1", Hat, [Menu]),
    block!("when I receive %1", Hat, [Menu]),
    block!("broadcast %1", Stack, [Menu]),
    block!("broadcast %1 and wait", Stack, [Menu]),
    // Control
    block!("wait %1 seconds", Stack, [Number]),
    block!("repeat %1", CBlock, [Number]),
    block!("forever", CBlock),
    block!("if %1 then", CBlock, [Boolean]),
    block!("else", Keyword),
    block!("end", Keyword),
    block!("wait until %1", Stack, [Boolean]),
    block!("repeat until %1", CBlock, [Boolean]),
    block!("stop %1", Cap, [Menu]),
    block!("when I start as a clone", Hat),
    block!("create clone of %1", Stack, [Menu]),
    block!("delete this clone", Cap),
    // Sensing
    block!("touching %1?", Boolean, [Menu]),
    block!("touching color %1?", Boolean, [Color]),
    block!("distance to %1", Reporter, [Menu]),
    block!("ask %1 and wait", Stack, [Text]),
    block!("answer", Reporter),
    block!("key %1 pressed?", Boolean, [Menu]),
    block!("mouse down?", Boolean),
    block!("mouse x", Reporter),
    block!("mouse y", Reporter),
    block!("timer", Reporter),
    block!("reset timer", Stack),
    block!("%1 of %2", Reporter, [Menu, Menu]),
    block!("current %1", Reporter, [Menu]),
    // Operators
    block!("pick random %1 to %2", Reporter, [Number, Number]),
    block!("%1 > %2", Boolean, [Text, Text]),
    block!("%1 < %2", Boolean, [Text, Text]),
    block!("%1 = %2", Boolean, [Text, Text]),
    block!("%1 and %2", Boolean, [Boolean, Boolean]),
    block!("%1 or %2", Boolean, [Boolean, Boolean]),
    block!("not %1", Boolean, [Boolean]),
    block!("join %1 %2", Reporter, [Text, Text]),
    block!("letter %1 of %2", Reporter, [Number, Text]),
    block!("length of %1", Reporter, [Text]),
    block!("%1 contains %2?", Boolean, [Text, Text]),
    block!("round %1", Reporter, [Number]),
    // Variables
    block!("set %1 to %2", Stack, [Menu, Text]),
    block!("change %1 by %2", Stack, [Menu, Number]),
    block!("show variable %1", Stack, [Menu]),
    block!("hide variable %1", Stack, [Menu]),
];

/// Find the canonical block with the given spec
pub fn lookup(spec: &str) -> Option<&'static BlockSpec> {
    BLOCKS.iter().find(|block| block.spec == spec)
}
