//! Data model of time-calibrated phylogenetic trees.
//!
//! # Tree representation
//! A [Tree] stores its [Node]s in an arena and addresses them by [NodeId].
//! Each node carries an absolute [Age] in whole years before present; branch
//! lengths are derived as age differences, so they can never disagree with
//! the ages.
//!
//! All names go through [canonical_name], so `"homo  SAPIENS"` and
//! `"Homo sapiens"` are the same taxon.
//!
//! # Editing
//! Trees are edited through [Tree::add], [Tree::add_sister],
//! [Tree::delete], [Tree::move_root], [Tree::set_age] and
//! [Tree::set_name]. Edits keep the age ordering and unique names; the
//! remaining invariants are checked by [Tree::validate]. [Tree::format]
//! renumbers the nodes canonically.
//!
//! # Collections and rows
//! A [Collection] holds trees by unique name. [NodeRow] and [RowLoader]
//! convert between collections and flat per-node records.

pub mod canon;
pub mod collection;
pub mod error;
pub mod node;
pub mod rows;
pub mod tree;

pub use canon::canonical_name;
pub use collection::Collection;
pub use error::TreeError;
pub use node::{Age, MILLION_YEARS, Node, NodeId, million_from_years, years_from_million};
pub use rows::{NodeRow, RowLoader};
pub use tree::{PostOrderIter, PreOrderIter, Tree};
