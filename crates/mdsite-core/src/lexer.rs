//! Line lexer and block segmenter.
//!
//! The lexer splits input into lines using `memchr` for newline scanning.
//! The segmenter groups consecutive non-empty lines into blocks: two or more
//! newlines in a row separate blocks, a single newline does not.

use memchr::memchr;

/// A single line from the input with its byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline or carriage return).
    pub text: &'a str,
    /// Byte offset of the line start in the input.
    pub start: usize,
    /// Byte offset of the line end (exclusive) in the input.
    pub end: usize,
}

impl<'a> Line<'a> {
    /// Check if the line has no characters at all.
    ///
    /// A line holding only spaces is not empty and does not separate blocks.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Line-based lexer with peek/consume access.
pub struct Lexer<'a> {
    input: &'a str,
    offset: usize,
    peeked: Option<Line<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            peeked: None,
        }
    }

    /// Check if all input has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.peeked.is_none() && self.offset >= self.input.len()
    }

    /// Peek at the next line without consuming it.
    #[inline]
    pub fn peek_line(&mut self) -> Option<&Line<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.read_line();
        }
        self.peeked.as_ref()
    }

    /// Consume and return the next line.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if let Some(line) = self.peeked.take() {
            return Some(line);
        }
        self.read_line()
    }

    /// Skip empty lines and return the count skipped.
    #[inline]
    pub fn skip_empty_lines(&mut self) -> usize {
        let mut count = 0;
        while let Some(line) = self.peek_line() {
            if !line.is_empty() {
                break;
            }
            self.next_line();
            count += 1;
        }
        count
    }

    fn read_line(&mut self) -> Option<Line<'a>> {
        let bytes = self.input.as_bytes();
        if self.offset >= bytes.len() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &bytes[start..]) {
            Some(pos) => start + pos,
            None => bytes.len(),
        };

        // CRLF: drop the carriage return from the line text.
        let text_end = if end > start && bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = if end < bytes.len() { end + 1 } else { end };

        Some(Line {
            text: &self.input[start..text_end],
            start,
            end: text_end,
        })
    }
}

/// Split a document into trimmed, non-empty blocks in source order.
pub fn segment(input: &str) -> Vec<&str> {
    let mut lexer = Lexer::new(input);
    let mut blocks = Vec::new();

    lexer.skip_empty_lines();
    while !lexer.is_eof() {
        let Some(first) = lexer.next_line() else {
            break;
        };

        let start = first.start;
        let mut end = first.end;
        while let Some(line) = lexer.peek_line() {
            if line.is_empty() {
                break;
            }
            end = line.end;
            lexer.next_line();
        }

        let block = input[start..end].trim();
        if !block.is_empty() {
            blocks.push(block);
        }
        lexer.skip_empty_lines();
    }

    blocks
}
