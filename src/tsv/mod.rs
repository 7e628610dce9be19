//! Tab-separated tables of time-calibrated trees.
//!
//! A table has one row per node, and these columns (in any order, names
//! case-insensitive):
//! * `tree` - name of the tree
//! * `node` - ID of the node, unique in its tree
//! * `parent` - ID of the parent, `-1` (or empty) for the root
//! * `age` - age of the node in years
//! * `taxon` - taxon name, empty for most internal nodes
//!
//! Rows of a tree must list every parent before its children, which is the
//! pre-order produced by [write]. Lines starting with `#` and blank lines
//! are ignored.
//!
//! ```text
//! # time calibrated phylogenetic trees
//! tree    node    parent  age     taxon
//! Amniota 0       -1      324000000
//! Amniota 1       0       324000000       Gallus gallus
//! ```

mod reader;
mod writer;

pub use reader::{read, read_file};
pub use writer::{write, write_file};

/// Column names, in the order they are written
const COLUMNS: [&str; 5] = ["tree", "node", "parent", "age", "taxon"];

/// Value of the `parent` column for roots
const NO_PARENT: &str = "-1";

/// Lines starting with this are comments
const COMMENT: char = '#';
