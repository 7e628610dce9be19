//! Newick format parser and writer for time-calibrated trees.
//!
//! This module provides [NewickParser] to parse Newick strings into
//! [Tree](crate::model::Tree)s. It may be used directly on Newick files or
//! strings, and is used for the tree statements of Nexus files.
//!
//! # Quick API
//! For simple use cases with default settings (root age inferred):
//! * [`parse_file`] - parses all trees of a file into a [Collection]
//! * [`parse_reader`] - parses all trees a reader yields into a [Collection]
//! * [`parse_str`] - parses all trees of a string into a [Collection]
//!
//! # Full API
//! For more control, configure a [NewickParser] and
//! provide data via a [ByteParser]:
//! * [`NewickParser::next_tree`] - parse the next tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! # Format
//! The accepted grammar is tolerant:
//! * `tree ::= '(' node+ ')' [label] [branch_length] ';'`
//! * `node ::= terminal | '(' node+ ')' [label] [branch_length]`
//! * `terminal ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Children are separated by commas or whitespace
//! * Every internal node needs at least two children
//! * Unquoted labels have underscores turned into spaces; quoted labels
//!   (`'...'`, with `''` for a quote) are taken verbatim
//! * Labels after a closing parenthesis (e.g. support values) are skipped
//! * Branch lengths are million years; a missing one counts as zero, an
//!   explicit one is at least one year
//! * Comments are square brackets and can occur wherever whitespace can

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickIterator, NewickParser};
pub use writer::{to_newick, write_newick, write_newick_file};

use crate::model::Collection;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::io::Read;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses all trees of a Newick file.
///
/// # Arguments
/// * `path` - Path to the file with `;`-terminated Newick trees
/// * `name` - Base name of the trees; later trees get `.1`, `.2`, ...
///
/// # Example
/// ```no_run
/// use timetree::newick::parse_file;
///
/// let trees = parse_file("dinosauria.nwk", "dinos")?;
/// println!("Parsed {} trees", trees.len());
/// # Ok::<(), timetree::parser::ParsingError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P, name: &str) -> Result<Collection, ParsingError> {
    NewickParser::new(name).parse_all(ByteParser::from_file(path)?)
}

/// Parses all trees yielded by a reader.
pub fn parse_reader<R: Read>(reader: R, name: &str) -> Result<Collection, ParsingError> {
    NewickParser::new(name).parse_all(ByteParser::from_reader(reader)?)
}

/// Parses all trees of a string.
///
/// # Example
/// ```
/// use timetree::newick::parse_str;
///
/// let trees = parse_str("((A:1,B:1):1,C:2); ((A:1,C:1):1,B:2);", "abc")?;
/// assert_eq!(trees.names(), vec!["Abc", "Abc.1"]);
/// # Ok::<(), timetree::parser::ParsingError>(())
/// ```
pub fn parse_str(newick: &str, name: &str) -> Result<Collection, ParsingError> {
    NewickParser::new(name).parse_all(ByteParser::for_str(newick))
}
