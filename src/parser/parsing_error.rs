//! Error types for Nexus, Newick and tabular parsing.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading trees from text.

use crate::model::TreeError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::fmt;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing.
#[derive(PartialEq, Debug, Clone, Error)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),
    #[error("Unexpected end of file")]
    UnexpectedEOF,
    #[error("File does not start with #NEXUS header")]
    MissingNexusHeader,
    #[error("Invalid formatting - {0}")]
    InvalidFormatting(String),
    #[error("Invalid TREES block format - {0}")]
    InvalidTreesBlock(String),
    #[error("Invalid TRANSLATE command - {0}")]
    InvalidTranslateCommand(String),
    #[error("No trees found")]
    NoTrees,
    #[error("Unclosed comment")]
    UnclosedComment,
    #[error("Unclosed quoted label")]
    UnclosedQuote,
    #[error("Input contains no Newick tree")]
    NotNewick,
    #[error("Invalid newick string: {0}")]
    InvalidNewickString(String),
    #[error("Unexpected branch length where a node was expected")]
    UnexpectedBranchLength,
    #[error("Invalid branch length '{0}'")]
    InvalidBranchLength(String),
    #[error("Unbalanced parentheses")]
    UnbalancedParentheses,
    #[error("Invalid table header - {0}")]
    InvalidTableHeader(String),
    #[error("Invalid row at line {line} - {msg}")]
    InvalidRow { line: usize, msg: String },
    #[error("Rejected row at line {line}: {source}")]
    RejectedRow { line: usize, source: TreeError },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position, surrounding bytes,
/// and the last terminal read before the error).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: Option<usize>,
    context: String,
    last_terminal: Option<String>,
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: Some(parser.position()),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
            last_terminal: None,
        }
    }

    /// Convenience constructor for UnexpectedEOF
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::UnexpectedEOF, parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: &str) -> Self {
        Self::from_parser(ParsingErrorType::InvalidNewickString(msg.to_string()), parser)
    }

    /// Convenience constructor for InvalidTreesBlock
    pub fn invalid_trees_block<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidTreesBlock(msg), parser)
    }

    /// Convenience constructor for InvalidTranslateCommand
    pub fn invalid_translate_command<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParsingErrorType::InvalidTranslateCommand(msg), parser)
    }

    /// Create a ParsingError without parser context
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self {
            kind,
            position: None,
            context: String::new(),
            last_terminal: None,
        }
    }

    /// Attaches the name of the last terminal read before the error.
    pub fn with_last_terminal(mut self, last_terminal: Option<String>) -> Self {
        if self.last_terminal.is_none() {
            self.last_terminal = last_terminal;
        }
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the byte position where the error occurred, if known
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Get the name of the last terminal read before the error, if any
    pub fn last_terminal(&self) -> Option<&str> {
        self.last_terminal.as_deref()
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(position) = self.position {
            write!(f, " at position {position}")?;
        }
        if let Some(terminal) = &self.last_terminal {
            write!(f, " (last read terminal: '{terminal}')")?;
        }
        if !self.context.is_empty() {
            write!(f, "\n  Context (next {} bytes): {}", self.context.len(), self.context)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        Self::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}

impl From<TreeError> for ParsingError {
    fn from(err: TreeError) -> Self {
        Self::without_context(ParsingErrorType::Tree(err))
    }
}
