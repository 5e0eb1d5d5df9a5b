//! Inline tokenizer.
//!
//! Turns one run of text into typed spans in a fixed sequence of passes:
//! `**` bold, `*` italic, `` ` `` code, then images and links. Each pass only
//! looks at spans the earlier passes left as plain text, so styles never
//! nest. Spans borrow from the input.

use std::sync::LazyLock;

use memchr::memmem;
use regex::Regex;

use crate::error::{ConvertError, Result};
use crate::node::Node;

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image pattern"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link pattern"));

/// Category of an inline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A typed fragment of inline text.
///
/// Only `Link` and `Image` carry a target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSpan<'a> {
    Plain(&'a str),
    Bold(&'a str),
    Italic(&'a str),
    Code(&'a str),
    Link { label: &'a str, url: &'a str },
    Image { label: &'a str, url: &'a str },
}

impl<'a> TextSpan<'a> {
    /// Get the span category.
    pub fn kind(&self) -> SpanKind {
        match self {
            TextSpan::Plain(_) => SpanKind::Plain,
            TextSpan::Bold(_) => SpanKind::Bold,
            TextSpan::Italic(_) => SpanKind::Italic,
            TextSpan::Code(_) => SpanKind::Code,
            TextSpan::Link { .. } => SpanKind::Link,
            TextSpan::Image { .. } => SpanKind::Image,
        }
    }

    /// Get the text content (the label for links and images).
    pub fn content(&self) -> &'a str {
        match *self {
            TextSpan::Plain(s) | TextSpan::Bold(s) | TextSpan::Italic(s) | TextSpan::Code(s) => s,
            TextSpan::Link { label, .. } | TextSpan::Image { label, .. } => label,
        }
    }

    /// Get the target URL of a link or image.
    pub fn target(&self) -> Option<&'a str> {
        match *self {
            TextSpan::Link { url, .. } | TextSpan::Image { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Convert the span to a leaf node.
    pub fn to_node(&self) -> Node {
        match *self {
            TextSpan::Plain(text) => Node::text(text),
            TextSpan::Bold(text) => Node::leaf("b", text),
            TextSpan::Italic(text) => Node::leaf("i", text),
            TextSpan::Code(text) => Node::leaf("code", text),
            TextSpan::Link { label, url } => Node::leaf("a", label).with_attr("href", url),
            TextSpan::Image { label, url } => Node::leaf("img", "")
                .with_attr("src", url)
                .with_attr("alt", label),
        }
    }
}

/// A paired inline delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `**`
    Bold,
    /// `*`
    Italic,
    /// `` ` ``
    Code,
}

impl Delimiter {
    /// The marker text.
    pub const fn marker(self) -> &'static str {
        match self {
            Delimiter::Bold => "**",
            Delimiter::Italic => "*",
            Delimiter::Code => "`",
        }
    }

    #[inline]
    fn span(self, text: &str) -> TextSpan<'_> {
        match self {
            Delimiter::Bold => TextSpan::Bold(text),
            Delimiter::Italic => TextSpan::Italic(text),
            Delimiter::Code => TextSpan::Code(text),
        }
    }
}

/// Tokenize text into spans.
///
/// An empty string yields a single empty plain span.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan<'_>>> {
    let spans = vec![TextSpan::Plain(text)];
    let spans = split_delimiter(spans, Delimiter::Bold)?;
    let spans = split_delimiter(spans, Delimiter::Italic)?;
    let spans = split_delimiter(spans, Delimiter::Code)?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}

/// Tokenize text and convert every span to a leaf node.
pub fn text_to_nodes(text: &str) -> Result<Vec<Node>> {
    Ok(tokenize(text)?.iter().map(TextSpan::to_node).collect())
}

/// Split plain spans on every occurrence of `delimiter`.
///
/// Segments at odd positions take the delimiter's style. Empty segments are
/// kept. An even segment count means a delimiter was left open.
pub fn split_delimiter<'a>(
    spans: Vec<TextSpan<'a>>,
    delimiter: Delimiter,
) -> Result<Vec<TextSpan<'a>>> {
    let marker = delimiter.marker();
    let finder = memmem::Finder::new(marker);
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let segments = split_on(&finder, text, marker.len());
        if segments.len() % 2 == 0 {
            return Err(ConvertError::UnterminatedDelimiter {
                delimiter: marker,
                text: text.to_string(),
                segments: segments.len(),
            });
        }

        for (index, segment) in segments.into_iter().enumerate() {
            if index % 2 == 0 {
                out.push(TextSpan::Plain(segment));
            } else {
                out.push(delimiter.span(segment));
            }
        }
    }

    Ok(out)
}

#[inline]
fn split_on<'a>(finder: &memmem::Finder<'_>, text: &'a str, marker_len: usize) -> Vec<&'a str> {
    let mut segments = Vec::with_capacity(4);
    let mut start = 0;
    // Markers are ASCII, so every match offset is a char boundary.
    for pos in finder.find_iter(text.as_bytes()) {
        segments.push(&text[start..pos]);
        start = pos + marker_len;
    }
    segments.push(&text[start..]);
    segments
}

/// Extract `![label](url)` images from plain spans.
pub fn split_images(spans: Vec<TextSpan<'_>>) -> Vec<TextSpan<'_>> {
    split_pattern(spans, next_image, |label, url| TextSpan::Image { label, url })
}

/// Extract `[label](url)` links from plain spans, skipping `![` images.
pub fn split_links(spans: Vec<TextSpan<'_>>) -> Vec<TextSpan<'_>> {
    split_pattern(spans, next_link, |label, url| TextSpan::Link { label, url })
}

/// A bracketed match: byte range in the text plus its label and url.
struct Bracketed<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

fn split_pattern<'a>(
    spans: Vec<TextSpan<'a>>,
    find: impl Fn(&'a str) -> Option<Bracketed<'a>>,
    make: impl Fn(&'a str, &'a str) -> TextSpan<'a>,
) -> Vec<TextSpan<'a>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let TextSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest = text;
        let mut found = false;
        while let Some(m) = find(rest) {
            found = true;
            if m.start > 0 {
                out.push(TextSpan::Plain(&rest[..m.start]));
            }
            out.push(make(m.label, m.url));
            rest = &rest[m.end..];
        }

        if !found {
            out.push(span);
        } else if !rest.is_empty() {
            out.push(TextSpan::Plain(rest));
        }
    }

    out
}

fn next_image(text: &str) -> Option<Bracketed<'_>> {
    let caps = IMAGE_RE.captures(text)?;
    bracketed(&caps)
}

fn next_link(text: &str) -> Option<Bracketed<'_>> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while from <= text.len() {
        let caps = LINK_RE.captures_at(text, from)?;
        let whole = caps.get(0)?;
        if whole.start() > 0 && bytes[whole.start() - 1] == b'!' {
            // Resume just past the rejected `[` so a later bracket can still
            // start a link.
            from = whole.start() + 1;
            continue;
        }
        return bracketed(&caps);
    }
    None
}

fn bracketed<'a>(caps: &regex::Captures<'a>) -> Option<Bracketed<'a>> {
    let whole = caps.get(0)?;
    Some(Bracketed {
        start: whole.start(),
        end: whole.end(),
        label: caps.get(1)?.as_str(),
        url: caps.get(2)?.as_str(),
    })
}
