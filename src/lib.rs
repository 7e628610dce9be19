//! Timetree is a library for time-calibrated phylogenetic trees, with
//! parsers for Newick strings and Nexus files.
//!
//! In a time-calibrated tree every node carries an age in years before
//! present, so the branch length between a node and its parent is the
//! difference of their ages. Core functionality provided:
//! - Tree model: [Tree] stores nodes in an arena and offers editing
//!   (add, add sister, delete, re-age, rename, re-root age) and queries
//!   (MRCA, lengths, depth, traversals). See [crate::model].
//! - Collections: [Collection] keeps trees by their canonical name.
//! - Newick: Parse each Newick string of a file or string, and write trees
//!   back as Newick. See [crate::newick].
//! - Nexus: Parse the TREES block of Nexus files, including translation
//!   tables. See [crate::nexus].
//! - Tables: Read and write trees as tab-separated node tables. See
//!   [crate::tsv].
//!
//! Names of taxa and trees are canonical: whitespace is collapsed and only
//! the first letter is upper case, so `homo  SAPIENS` is `Homo sapiens`.
//!
//! # Usage patterns
//! 1. Several functions provide quick access to parsers with default
//!    settings. See [crate::newick] and [crate::nexus] documentation.
//! 2. Configure a [NewickParser](crate::newick::NewickParser) or
//!    [NexusParser](crate::nexus::NexusParser) to set a root age.
//!
//! ## Example
//! ```
//! use timetree::parse_newick_str;
//!
//! let trees = parse_newick_str("((Homo_sapiens:6.3,Pan:6.3):317.7,Gallus_gallus:324);", "amniota")?;
//! let tree = trees.get("amniota").unwrap();
//!
//! assert_eq!(tree.root_age(), 324_000_000);
//! assert_eq!(tree.num_terms(), 3);
//! assert_eq!(tree.mrca(&["Homo sapiens", "Pan"]).and_then(|id| tree.age(id)), Some(6_300_000));
//! # Ok::<(), timetree::parser::ParsingError>(())
//! ```
//!
//! ## Example Parser Configuration
//! ```no_run
//! use timetree::nexus::NexusParser;
//! use timetree::parser::ByteParser;
//!
//! let trees = NexusParser::new()
//!     .with_root_age(250_000_000)
//!     .parse(ByteParser::from_file("dinosauria.nex")?)?;
//! println!("Loaded {} trees", trees.len());
//! # Ok::<(), timetree::parser::ParsingError>(())
//! ```

pub mod model;
pub mod newick;
pub mod nexus;
pub mod parser;
pub mod tsv;

pub use crate::model::{Age, Collection, Node, NodeId, NodeRow, Tree, TreeError};
pub use crate::parser::ParsingError;

use std::path::Path;

// ============================================================================
// Quick Nexus API
// ============================================================================
/// Parses a Nexus file using default settings.
///
/// See [`nexus::parse_file`] for full documentation.
pub fn parse_nexus_file<P: AsRef<Path>>(path: P) -> Result<Collection, ParsingError> {
    nexus::parse_file(path)
}

/// Parses a Nexus string using default settings.
///
/// See [`nexus::parse_str`] for full documentation.
pub fn parse_nexus_str(nexus: &str) -> Result<Collection, ParsingError> {
    nexus::parse_str(nexus)
}

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses all Newick trees of a string using default settings.
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_newick_str(newick: &str, name: &str) -> Result<Collection, ParsingError> {
    newick::parse_str(newick, name)
}

/// Parses a file containing `;`-terminated Newick trees using default
/// settings.
///
/// See [`newick::parse_file`] for full documentation.
pub fn parse_newick_file<P: AsRef<Path>>(path: P, name: &str) -> Result<Collection, ParsingError> {
    newick::parse_file(path, name)
}
