//! Tree nodes and the integer time units they carry.

/// Identifier of a node within its [Tree](crate::model::Tree) (arena index).
pub type NodeId = usize;

/// Time before present, or a branch length, in whole years.
pub type Age = u64;

/// Number of years in one million years, the unit of Newick branch lengths.
pub const MILLION_YEARS: f64 = 1_000_000.0;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node of a time-calibrated tree.
///
/// Nodes live in the arena of their [Tree](crate::model::Tree) and refer to
/// each other only through [NodeId]s: a node knows the ID of its parent
/// (`None` for the root) and the IDs of its children, in their current order.
/// The branch length is not stored, it is always derived from the age
/// difference to the parent.
///
/// # Invariants
/// - `age` is never larger than the age of the parent
/// - `taxon` is either empty or in [canonical form](crate::model::canonical_name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) age: Age,
    pub(crate) taxon: String,
}

impl Node {
    pub(crate) fn new(id: NodeId, parent: Option<NodeId>, age: Age, taxon: String) -> Self {
        Node {
            id,
            parent,
            children: Vec::new(),
            age,
            taxon,
        }
    }

    /// Returns the ID of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the ID of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the IDs of the children in their current order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the age in years before present.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Returns the taxon name; empty if the node is unnamed.
    pub fn taxon(&self) -> &str {
        &self.taxon
    }

    /// Returns `true` if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if this node has no children.
    pub fn is_term(&self) -> bool {
        self.children.is_empty()
    }
}

// =#========================================================================#=
// UNIT CONVERSION
// =#========================================================================#=
/// Converts a value in million years into whole years, truncating.
///
/// # Returns
/// `None` if `value` is negative, not finite, or too large for [Age].
///
/// # Examples
/// ```
/// use timetree::model::years_from_million;
/// assert_eq!(years_from_million(2.5), Some(2_500_000));
/// assert_eq!(years_from_million(1e-7), Some(0));
/// assert_eq!(years_from_million(-1.0), None);
/// ```
pub fn years_from_million(value: f64) -> Option<Age> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let years = value * MILLION_YEARS;
    if years >= Age::MAX as f64 {
        return None;
    }
    Some(years as Age)
}

/// Converts whole years into million years.
pub fn million_from_years(years: Age) -> f64 {
    years as f64 / MILLION_YEARS
}
