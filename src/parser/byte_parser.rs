//! Low-level byte-by-byte parser for ASCII-structured text.
//!
//! This module provides [ByteParser] for parsing text-based file formats with
//! support for peeking, consuming, pattern matching, and quote-aware label
//! parsing. Used as the foundation for both the Nexus and Newick parsers.
//! Labels may contain UTF-8, all structural characters are ASCII.

use crate::parser::byte_parser::ConsumeMode::Inclusive;
use crate::parser::byte_source::{ByteSource, SliceByteSource};
use crate::parser::in_memory_byte_source::InMemoryByteSource;
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use std::io::Read;
use std::path::Path;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser with support for peeking, consuming, and pattern matching.
///
/// # Features
/// - Works with any [ByteSource] (borrowed or owned)
/// - Case-insensitive matching for ASCII characters
/// - Whitespace and `[...]` comment skipping
/// - Quote-aware label parsing (doubled quotes as escape)
/// - Context extraction for error reporting
///
/// # Example
/// ```
/// use timetree::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [comment] BEGIN TREES;");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert!(parser.consume_if_sequence(b"begin"));
/// parser.skip_whitespace();
/// assert_eq!(parser.parse_unquoted_label(b";"), "TREES");
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
}

impl<'a> ByteParser<SliceByteSource<'a>> {
    /// Creates a `ByteParser` over a borrowed string.
    pub fn for_str(input: &'a str) -> Self {
        Self::new(SliceByteSource::new(input.as_bytes()))
    }

    /// Creates a `ByteParser` over borrowed bytes.
    pub fn for_bytes(input: &'a [u8]) -> Self {
        Self::new(SliceByteSource::new(input))
    }
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a `ByteParser` over the content of a file, read into memory.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be read.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }

    /// Creates a `ByteParser` over everything `reader` yields.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ParsingError> {
        Ok(Self::new(InMemoryByteSource::from_reader(reader)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Peeks at the current byte without consuming it.
    ///
    /// # Returns
    /// * `Some(u8)` - The current byte if available
    /// * `None` - If at end of data (EOF)
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        self.source.next_byte()
    }

    /// Skips (consumes) all consecutive whitespace characters.
    ///
    /// Whitespace includes: space (' '), tab ('\t'), newline ('\n'), and carriage return ('\r').
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.next_byte();
        }
    }

    /// Skips (consumes) a comment if present.
    ///
    /// Comments are enclosed in square brackets `[...]` and are not nested:
    /// the first `]` ends the comment.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    ///
    /// # Errors
    /// Returns an error if a comment starts with `[` but doesn't have a closing `]`.
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.consume_if(b'[') {
            if !self.consume_until(b']', Inclusive) {
                return Err(ParsingError::from_parser(ParsingErrorType::UnclosedComment, self));
            }
            return Ok(true);
        }

        Ok(false)
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    ///
    /// # Errors
    /// Returns an error if an unclosed comment is encountered.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Checks if the current byte matches `ch` (case-insensitive for ASCII).
    pub fn peek_is(&self, ch: u8) -> bool {
        self.peek().is_some_and(|b| b.eq_ignore_ascii_case(&ch))
    }

    /// Checks if the following bytes match the given byte sequence (case-insensitive).
    ///
    /// This is a peek operation - the parser position is not changed.
    pub fn peek_is_sequence(&self, sequence: &[u8]) -> bool {
        self.source.peek_slice(sequence.len()).eq_ignore_ascii_case(sequence)
    }

    /// Consumes the current byte if it matches `ch` (case-insensitive).
    ///
    /// # Returns
    /// `true` if the byte was matched and consumed, `false` otherwise
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek_is(ch) {
            self.next_byte();
            true
        } else {
            false
        }
    }

    /// Consumes the next bytes if they match the given byte sequence (case-insensitive).
    ///
    /// # Returns
    /// `true` if the sequence was matched and consumed, `false` otherwise
    pub fn consume_if_sequence(&mut self, sequence: &[u8]) -> bool {
        if !self.peek_is_sequence(sequence) {
            return false;
        }

        for _ in 0..sequence.len() {
            self.next_byte();
        }

        true
    }

    /// Consumes bytes until the target byte is found.
    ///
    /// # Arguments
    /// * `target` - The byte to search for
    /// * `mode` - Whether to consume the target byte (`Inclusive`) or stop before it (`Exclusive`)
    ///
    /// # Returns
    /// `true` if the target was found, `false` if EOF was reached first
    pub fn consume_until(&mut self, target: u8, mode: ConsumeMode) -> bool {
        while let Some(b) = self.peek() {
            if b == target {
                if mode == Inclusive {
                    self.next_byte();
                }
                return true;
            }
            self.next_byte();
        }
        false // reached EOF without finding target
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns a string from up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        String::from_utf8_lossy(self.source.peek_slice(k)).into_owned()
    }

    /// Parses a quoted label with escape support.
    ///
    /// The current byte is taken as the opening quote. The label ends at the
    /// next unpaired occurrence of that quote; a doubled quote stands for one
    /// quote character (e.g. `'Wilson''s'` becomes `Wilson's`). Everything
    /// else is kept verbatim, including brackets, colons and whitespace.
    ///
    /// # Returns
    /// The parsed label without the enclosing quotes
    ///
    /// # Errors
    /// Returns an error if the label is not closed before EOF
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        let Some(quote) = self.next_byte() else {
            return Err(ParsingError::unexpected_eof(self));
        };

        let mut label = Vec::new();
        loop {
            match self.next_byte() {
                Some(b) if b == quote => {
                    if self.peek() == Some(quote) {
                        label.push(quote);
                        self.next_byte();
                    } else {
                        break;
                    }
                }
                Some(b) => label.push(b),
                None => return Err(ParsingError::from_parser(ParsingErrorType::UnclosedQuote, self)),
            }
        }

        Ok(String::from_utf8_lossy(&label).into_owned())
    }

    /// Parses an unquoted label until any of the given delimiters (or EOF) is encountered.
    ///
    /// The delimiter is not consumed; the label may be empty.
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let mut label = Vec::new();

        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            label.push(b);
            self.next_byte();
        }

        String::from_utf8_lossy(&label).into_owned()
    }
}

/// Specifies whether to consume or leave the target when using `consume_until` methods.
///
/// # Examples
/// ```
/// use timetree::parser::byte_parser::{ByteParser, ConsumeMode};
///
/// let mut parser = ByteParser::for_str("TREE t1=((A:0.5,B:0.5):0.3,C:0.8);");
///
/// // Inclusive: consume up to and including '=', e.g. to start of Newick string
/// parser.consume_until(b'=', ConsumeMode::Inclusive);
/// assert_eq!(parser.peek(), Some(b'('));
///
/// let mut parser = ByteParser::for_str("('Wilson''s_Storm-petrel')");
///
/// // Exclusive: consume up to but not including "'", e.g. quoted label start
/// parser.consume_until(b'\'', ConsumeMode::Exclusive);
/// assert_eq!(parser.peek(), Some(b'\''));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ConsumeMode {
    /// Consume the target byte along with everything before it.
    Inclusive,

    /// Stop before the target byte without consuming it.
    Exclusive,
}
