//! Errors raised by edits on trees and collections.

use crate::model::node::{Age, NodeId};
use thiserror::Error;

/// A request that would break a structural or temporal invariant of a
/// [Tree](crate::model::Tree) or [Collection](crate::model::Collection).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    // Structural
    #[error("parent node {0} not in tree")]
    NoParent(NodeId),
    #[error("sister node {0} not in tree")]
    NoSister(NodeId),
    #[error("node {0} is the root and cannot get a sister")]
    RootSister(NodeId),
    #[error("taxon name '{0}' already in tree")]
    RepeatedTaxon(String),
    #[error("node {0} has a single child")]
    SingleChild(NodeId),
    #[error("terminal node {0} has no taxon name")]
    UnnamedTerminal(NodeId),
    #[error("root node {0} cannot be deleted")]
    RootDeletion(NodeId),

    // Temporal
    #[error("branch length of {branch_length} years exceeds parent age of {parent_age} years")]
    InvalidBranchLength { branch_length: Age, parent_age: Age },
    #[error("root age of {age} years is below the longest root-to-terminal length of {min_age} years")]
    InvalidRootAge { age: Age, min_age: Age },
    #[error("age of {age} years at node {id} is older than the parent age of {parent_age} years")]
    OlderAge { id: NodeId, age: Age, parent_age: Age },
    #[error("age of {age} years at node {id} is younger than the oldest child age of {child_age} years")]
    YoungerAge { id: NodeId, age: Age, child_age: Age },

    // Collections and row import
    #[error("tree without name")]
    MissingTreeName,
    #[error("tree name '{0}' already in collection")]
    RepeatedTree(String),
    #[error("node ID {0} already in tree")]
    RepeatedNode(NodeId),
    #[error("node {0} would be a second root")]
    RepeatedRoot(NodeId),
}
