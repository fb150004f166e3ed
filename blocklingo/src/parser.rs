use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{
    Argument, Block, Bracket, Document, Fragment, Input, InputShape, Script, label_hash,
    slot_order,
};
use crate::blocks::BlockShape;
use crate::error::{ParseError, ParseErrorKind};
use crate::vocabulary::Vocabulary;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(\d+\.?\d*|\.\d+)([eE][-+]?\d+)?$").expect("number pattern is valid")
});

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{3}([0-9a-fA-F]{3})?$").expect("color pattern is valid")
});

/// A literal followed by the selector-arrow marker: `random position v`
static ARROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^(.*?)(\s+v\s*)$").expect("arrow pattern is valid"));

/// Where a label sits, used to prefer blocks of a fitting shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Line,
    Round,
    Angle,
}

impl Context {
    fn fits(self, shape: BlockShape) -> bool {
        match self {
            Context::Line => shape.fits_line(),
            Context::Round => shape.fits_round(),
            Context::Angle => shape.fits_angle(),
        }
    }
}

/// Line-based parser for block notation
///
/// Parsing is lossless: stringifying the resulting [`Document`] before any
/// translation reproduces the source text exactly.
pub struct Parser<'a> {
    source: String,
    languages: Vec<&'a Vocabulary>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &str) -> Self {
        Parser {
            source: source.to_string(),
            languages: Vec::new(),
        }
    }

    /// Languages to recognise blocks in, tried in order
    pub fn with_languages(mut self, languages: &[&'a Vocabulary]) -> Self {
        self.languages = languages.to_vec();
        self
    }

    pub fn parse(&self) -> Result<Document, ParseError> {
        let mut document = Document::default();
        let mut blanks: Vec<String> = Vec::new();
        let mut current: Option<Script> = None;

        for (index, line) in self.source.split('\n').enumerate() {
            if line.trim().is_empty() {
                if let Some(script) = current.take() {
                    document.scripts.push(script);
                }
                blanks.push(line.to_string());
                continue;
            }

            let block = self.parse_line(line, index + 1)?;
            current
                .get_or_insert_with(|| Script {
                    leading: std::mem::take(&mut blanks),
                    blocks: Vec::new(),
                })
                .blocks
                .push(block);
        }

        if let Some(script) = current {
            document.scripts.push(script);
        }
        document.trailing = blanks;
        Ok(document)
    }

    fn parse_line(&self, line: &str, line_no: usize) -> Result<Block, ParseError> {
        let chars: Vec<char> = line.chars().collect();
        let indent_len = chars.iter().take_while(|ch| ch.is_whitespace()).count();

        let (mut label, args, end) = self.scan_label(&chars, indent_len, chars.len(), line_no, true)?;

        // Trailing whitespace belongs with the comment, not the label
        let mut trailing: String = chars[end..].iter().collect();
        if let Some(Fragment::Text(text)) = label.last_mut() {
            let tail = text.split_off(text.trim_end().len());
            trailing.insert_str(0, &tail);
            if text.is_empty() {
                label.pop();
            }
        }

        let mut block = Block::new(label, args);
        block.indent = chars[..indent_len].iter().collect();
        block.trailing = trailing;
        self.resolve(&mut block, Context::Line);
        Ok(block)
    }

    /// Scan `chars[start..end]` into label fragments and arguments.
    /// Returns the position where scanning stopped (a top-level `//` comment or `end`).
    fn scan_label(
        &self,
        chars: &[char],
        start: usize,
        end: usize,
        line_no: usize,
        top_level: bool,
    ) -> Result<(Vec<Fragment>, Vec<Argument>, usize), ParseError> {
        let mut label = Vec::new();
        let mut args = Vec::new();
        let mut text = String::new();
        let mut i = start;

        while i < end {
            let ch = chars[i];
            let opens = match ch {
                '[' | '(' => true,
                '<' => opens_angle(chars, i, end),
                _ => false,
            };

            if opens {
                let close = find_close(chars, i, end, line_no)?;
                if !text.is_empty() {
                    label.push(Fragment::Text(std::mem::take(&mut text)));
                }
                args.push(self.parse_argument(chars, i, close, line_no)?);
                label.push(Fragment::Slot(args.len() - 1));
                i = close + 1;
                continue;
            }

            match ch {
                ']' | ')' => {
                    return Err(ParseError {
                        line: line_no,
                        column: i + 1,
                        kind: ParseErrorKind::UnexpectedClose(ch),
                    });
                }
                '/' if top_level
                    && chars.get(i + 1) == Some(&'/')
                    && (i == 0 || chars[i - 1].is_whitespace()) =>
                {
                    break;
                }
                _ => text.push(ch),
            }
            i += 1;
        }

        if !text.is_empty() {
            label.push(Fragment::Text(text));
        }
        Ok((label, args, i))
    }

    fn parse_argument(
        &self,
        chars: &[char],
        open: usize,
        close: usize,
        line_no: usize,
    ) -> Result<Argument, ParseError> {
        let content: String = chars[open + 1..close].iter().collect();
        let trimmed = content.trim();

        match chars[open] {
            '[' => Ok(Argument::Input(square_input(&content))),
            '(' => {
                if trimmed.is_empty() || NUMBER.is_match(trimmed) {
                    return Ok(Argument::Input(Input::new(
                        Bracket::Round,
                        InputShape::Number,
                        &content,
                    )));
                }
                if !content.contains(['[', ']', '(', ')', '<', '>']) {
                    if let Some(caps) = ARROW.captures(&content) {
                        return Ok(Argument::Input(
                            Input::new(Bracket::Round, InputShape::NumberDropdown, &caps[1])
                                .with_arrow(&caps[2]),
                        ));
                    }
                }
                let block = self.parse_nested(chars, open + 1, close, line_no, Context::Round)?;
                Ok(Argument::Block {
                    bracket: Bracket::Round,
                    block: Box::new(block),
                })
            }
            _ => {
                if trimmed.is_empty() {
                    return Ok(Argument::Input(Input::new(
                        Bracket::Angle,
                        InputShape::Boolean,
                        &content,
                    )));
                }
                let block = self.parse_nested(chars, open + 1, close, line_no, Context::Angle)?;
                Ok(Argument::Block {
                    bracket: Bracket::Angle,
                    block: Box::new(block),
                })
            }
        }
    }

    fn parse_nested(
        &self,
        chars: &[char],
        start: usize,
        end: usize,
        line_no: usize,
        context: Context,
    ) -> Result<Block, ParseError> {
        let (label, args, _) = self.scan_label(chars, start, end, line_no, false)?;
        let mut block = Block::new(label, args);
        self.resolve(&mut block, context);
        Ok(block)
    }

    /// Match the block against the configured languages. A match renumbers the
    /// label's slots into canonical order and retypes its inputs; dropdown
    /// inputs then cache their literal as the raw menu value.
    fn resolve(&self, block: &mut Block, context: Context) {
        let hash = label_hash(&block.label);
        let arity = block.args.len();
        if !hash.is_empty() {
            let candidates: Vec<_> = self
                .languages
                .iter()
                .copied()
                .flat_map(|vocabulary| {
                    vocabulary
                        .candidates(&hash)
                        .iter()
                        .filter_map(move |spec| Some((*spec, vocabulary.template(spec.spec)?)))
                })
                // A literal `_` word hashes like a slot
                .filter(|(spec, _)| spec.arity() == arity)
                .collect();

            let matched = candidates
                .iter()
                .find(|(spec, _)| context.fits(spec.shape))
                .or_else(|| candidates.first());

            if let Some((spec, template)) = matched {
                let order = slot_order(template);
                let mut args: Vec<Option<Argument>> = block.args.drain(..).map(Some).collect();
                let mut canonical: Vec<Option<Argument>> = vec![None; order.len()];
                for (position, slot) in order.iter().enumerate() {
                    if let (Some(target), Some(arg)) =
                        (canonical.get_mut(*slot), args.get_mut(position))
                    {
                        *target = arg.take();
                    }
                }
                block.args = canonical.into_iter().flatten().collect();

                let mut slots = order.iter();
                for fragment in &mut block.label {
                    if let Fragment::Slot(index) = fragment {
                        if let Some(slot) = slots.next() {
                            *index = *slot;
                        }
                    }
                }

                for (arg, kind) in block.args.iter_mut().zip(spec.args) {
                    if let Argument::Input(input) = arg {
                        input.retype(*kind);
                    }
                }
                block.spec = Some(*spec);
            }
        }

        for arg in &mut block.args {
            if let Argument::Input(input) = arg {
                input.capture_menu();
            }
        }
    }
}

fn square_input(content: &str) -> Input {
    if COLOR.is_match(content.trim()) {
        return Input::new(Bracket::Square, InputShape::Color, content);
    }
    if let Some(caps) = ARROW.captures(content) {
        return Input::new(Bracket::Square, InputShape::Dropdown, &caps[1]).with_arrow(&caps[2]);
    }
    Input::new(Bracket::Square, InputShape::String, content)
}

/// `<` and `>` surrounded by whitespace are comparison operators, not brackets
fn is_operator(chars: &[char], i: usize, end: usize) -> bool {
    let before = i.checked_sub(1).map(|prev| chars[prev]);
    let after = (i + 1 < end).then(|| chars[i + 1]);
    matches!(before, Some(c) if c.is_whitespace()) && matches!(after, Some(c) if c.is_whitespace())
}

fn opens_angle(chars: &[char], i: usize, end: usize) -> bool {
    i + 1 < end && !is_operator(chars, i, end)
}

fn closes_angle(chars: &[char], i: usize, end: usize) -> bool {
    !is_operator(chars, i, end)
}

/// Position of the bracket closing the one at `open`
fn find_close(chars: &[char], open: usize, end: usize, line_no: usize) -> Result<usize, ParseError> {
    let mut stack = vec![chars[open]];
    let mut i = open + 1;

    while i < end {
        let ch = chars[i];
        let top = stack.last().copied().unwrap_or('[');

        if top == '[' {
            match ch {
                '\\' => i += 1,
                ']' => {
                    stack.pop();
                }
                _ => {}
            }
        } else {
            match ch {
                '[' | '(' => stack.push(ch),
                '<' if opens_angle(chars, i, end) => stack.push(ch),
                ')' if top == '(' => {
                    stack.pop();
                }
                '>' if top == '<' && closes_angle(chars, i, end) => {
                    stack.pop();
                }
                ']' | ')' => {
                    return Err(ParseError {
                        line: line_no,
                        column: i + 1,
                        kind: ParseErrorKind::UnexpectedClose(ch),
                    });
                }
                _ => {}
            }
        }

        if stack.is_empty() {
            return Ok(i);
        }
        i += 1;
    }

    Err(ParseError {
        line: line_no,
        column: open + 1,
        kind: ParseErrorKind::Unterminated(chars[open]),
    })
}
