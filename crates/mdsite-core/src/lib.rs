//! # mdsite Core
//!
//! Converts Markdown text into an HTML node tree and renders that tree to a
//! string.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsite_core::{parse_document, render};
//!
//! let input = "# Hello World\n\nThis is a **paragraph**.";
//! let node = parse_document(input).unwrap();
//! let html = render(&node).unwrap();
//!
//! assert_eq!(html, "<div><h1>Hello World</h1><p>This is a <b>paragraph</b>.</p></div>");
//! ```
//!
//! ## Pipeline
//!
//! 1. [`lexer::segment`] splits the document into blocks on blank lines.
//! 2. [`block::classify`] assigns each block a [`BlockKind`].
//! 3. [`parser::parse_block`] builds a [`Node`] subtree per block, running
//!    inline text through [`inline::tokenize`].
//! 4. [`Node::render`] concatenates the tree into HTML without escaping.
//!
//! ## Supported syntax
//!
//! - Headings `#` to `######`
//! - Fenced code blocks
//! - Quotes, unordered lists (`*` or `-`), ordered lists numbered from 1
//! - Inline `**bold**`, `*italic*`, `` `code` ``, `[links](url)` and
//!   `![images](url)`, without nesting

pub mod block;
pub mod error;
pub mod inline;
pub mod lexer;
pub mod node;
pub mod parser;

pub use block::{Block, BlockKind};
pub use error::{ConvertError, ConvertErrorKind, Result};
pub use inline::{SpanKind, TextSpan};
pub use node::{render, Attributes, LeafNode, Node, ParentNode};
pub use parser::{extract_title, markdown_to_html, parse_document};
