//! Nexus format parser for time-calibrated trees.
//!
//! This module provides [NexusParser], which reads the TREES block of Nexus
//! files and delegates each tree statement to the
//! [NewickParser](crate::newick::NewickParser). Numeric terminal labels are
//! resolved through the TRANSLATE table of the block.
//!
//! # Quick API
//! For simple use cases with default settings (root ages inferred):
//! * [`parse_file`] - parses all trees of a file
//! * [`parse_reader`] - parses all trees a reader yields
//! * [`parse_str`] - parses all trees of a string

mod defs;
pub mod parser;

pub use defs::NexusBlock;
pub use parser::NexusParser;

use crate::model::Collection;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use std::io::Read;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses all trees of a Nexus file.
///
/// # Example
/// ```no_run
/// use timetree::nexus::parse_file;
///
/// let trees = parse_file("dinosauria.nex")?;
/// for tree in &trees {
///     println!("{}: {} terminals", tree.name(), tree.num_terms());
/// }
/// # Ok::<(), timetree::parser::ParsingError>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Collection, ParsingError> {
    NexusParser::new().parse(ByteParser::from_file(path)?)
}

/// Parses all trees of Nexus data yielded by a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Collection, ParsingError> {
    NexusParser::new().parse(ByteParser::from_reader(reader)?)
}

/// Parses all trees of a Nexus string.
pub fn parse_str(nexus: &str) -> Result<Collection, ParsingError> {
    NexusParser::new().parse(ByteParser::for_str(nexus))
}
