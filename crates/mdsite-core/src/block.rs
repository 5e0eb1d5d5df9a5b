//! Block classification.
//!
//! Each block produced by the segmenter is assigned exactly one structural
//! type. Checks run in a fixed priority order and the first match wins;
//! anything unrecognized is a paragraph.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) \S").expect("valid heading pattern"));

const FENCE: &str = "```";

/// Structural type of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    /// Heading with level 1-6.
    Heading(u8),
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// A trimmed block of source text with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    pub kind: BlockKind,
    pub text: &'a str,
}

impl<'a> Block<'a> {
    /// Classify a block of text.
    pub fn new(text: &'a str) -> Self {
        Self {
            kind: classify(text),
            text,
        }
    }
}

/// Determine the structural type of a block.
pub fn classify(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }
    if is_code(block) {
        return BlockKind::Code;
    }
    if block.lines().all(|line| line.starts_with('>')) {
        return BlockKind::Quote;
    }
    if block.lines().all(|line| unordered_item(line).is_some()) {
        return BlockKind::UnorderedList;
    }
    if block
        .lines()
        .enumerate()
        .all(|(i, line)| ordered_item(line, i + 1).is_some())
    {
        return BlockKind::OrderedList;
    }
    BlockKind::Paragraph
}

/// Get the heading level if the block opens with 1-6 `#`, a space, and a
/// non-space character.
pub fn heading_level(block: &str) -> Option<u8> {
    let caps = HEADING_RE.captures(block)?;
    Some(caps.get(1)?.len() as u8)
}

/// Check for a fenced block: opens and closes with three backticks on
/// separate lines.
pub fn is_code(block: &str) -> bool {
    block.starts_with(FENCE) && block.ends_with(FENCE) && block.lines().nth(1).is_some()
}

/// Strip a `* ` or `- ` marker from a list line.
#[inline]
pub fn unordered_item(line: &str) -> Option<&str> {
    line.strip_prefix("* ").or_else(|| line.strip_prefix("- "))
}

/// Strip the `N. ` marker from a list line, where `N` must equal `number`.
#[inline]
pub fn ordered_item(line: &str, number: usize) -> Option<&str> {
    let rest = line.strip_prefix(number.to_string().as_str())?;
    rest.strip_prefix(". ")
}
