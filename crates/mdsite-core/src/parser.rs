//! Block-to-tree compiler.
//!
//! Segments a document into blocks, classifies each one, and builds an HTML
//! node subtree per block. Inline content goes through the inline tokenizer.
//! All block subtrees are collected in order under a root `div`.

use tracing::{debug, trace};

use crate::block::{self, Block, BlockKind};
use crate::error::{ConvertError, Result};
use crate::inline::text_to_nodes;
use crate::lexer;
use crate::node::Node;

/// Convert markdown text into an HTML node tree rooted at a `div`.
///
/// Blocks that match no specific type become paragraphs, so the only
/// failures come from unbalanced inline delimiters.
pub fn parse_document(markdown: &str) -> Result<Node> {
    let blocks = lexer::segment(markdown);
    debug!(blocks = blocks.len(), "segmented document");

    let mut children = Vec::with_capacity(blocks.len());
    for text in blocks {
        let block = Block::new(text);
        trace!(kind = ?block.kind, "classified block");
        children.push(parse_block(&block)?);
    }

    Ok(Node::parent("div", children))
}

/// Convert markdown text straight to an HTML string.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    parse_document(markdown)?.render()
}

/// Build the node subtree for one classified block.
pub fn parse_block(block: &Block<'_>) -> Result<Node> {
    match block.kind {
        BlockKind::Heading(level) => parse_heading(block.text, level),
        BlockKind::Code => parse_code_block(block.text),
        BlockKind::Quote => parse_quote_block(block.text),
        BlockKind::UnorderedList => parse_unordered_list(block.text),
        BlockKind::OrderedList => parse_ordered_list(block.text),
        BlockKind::Paragraph => parse_paragraph(block.text),
    }
}

fn parse_heading(text: &str, level: u8) -> Result<Node> {
    // Marker is `level` hashes plus one space, all ASCII.
    let content = text.get(level as usize + 1..).unwrap_or_default();
    Ok(Node::parent(format!("h{level}"), text_to_nodes(content)?))
}

fn parse_code_block(text: &str) -> Result<Node> {
    let lines: Vec<&str> = text.lines().collect();
    let body = match lines.len() {
        0..=2 => String::new(),
        n => lines[1..n - 1].join("\n"),
    };
    let code = Node::parent("code", text_to_nodes(&body)?);
    Ok(Node::parent("pre", vec![code]))
}

fn parse_quote_block(text: &str) -> Result<Node> {
    let mut stripped = Vec::new();
    for line in text.lines() {
        let rest = line
            .strip_prefix('>')
            .ok_or_else(|| ConvertError::InvalidQuoteLine {
                line: line.to_string(),
            })?;
        stripped.push(strip_one_whitespace(rest));
    }
    let content = stripped.join(" ");
    Ok(Node::parent("blockquote", text_to_nodes(&content)?))
}

#[inline]
fn strip_one_whitespace(s: &str) -> &str {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str(),
        _ => s,
    }
}

// The list compilers keep a line without its marker as-is. `classify` only
// yields a list kind when every line carries one, so this path is reached
// only through a hand-built `Block`.
fn parse_unordered_list(text: &str) -> Result<Node> {
    let mut items = Vec::new();
    for line in text.lines() {
        let content = block::unordered_item(line).unwrap_or(line);
        items.push(Node::parent("li", text_to_nodes(content)?));
    }
    Ok(Node::parent("ul", items))
}

fn parse_ordered_list(text: &str) -> Result<Node> {
    let mut items = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let content = block::ordered_item(line, i + 1).unwrap_or(line);
        items.push(Node::parent("li", text_to_nodes(content)?));
    }
    Ok(Node::parent("ol", items))
}

fn parse_paragraph(text: &str) -> Result<Node> {
    Ok(Node::parent("p", text_to_nodes(text)?))
}

/// Extract the page title: the text after the first line starting with `# `.
pub fn extract_title(markdown: &str) -> Result<&str> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .ok_or(ConvertError::TitleNotFound)
}
