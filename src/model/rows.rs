//! Row-per-node view of trees, the shape used by tabular import and export.
//!
//! Writing produces one [NodeRow] per node in pre-order from the root, so
//! parents always precede their children. Loading through a [RowLoader]
//! expects that order, rebuilds every tree with [Tree::add], and finally
//! validates and [formats](Tree::format) each tree.

use crate::model::canon::canonical_name;
use crate::model::collection::Collection;
use crate::model::error::TreeError;
use crate::model::node::{Age, NodeId};
use crate::model::tree::Tree;
use std::collections::HashMap;
use tracing::debug;

/// A single node of a tree as a flat record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRow {
    /// Name of the tree the node belongs to
    pub tree: String,
    pub node: NodeId,
    /// `None` for the root
    pub parent: Option<NodeId>,
    pub age: Age,
    /// Taxon name, may be empty
    pub taxon: String,
}

impl Tree {
    /// Returns one row per node, in pre-order.
    pub fn to_rows(&self) -> Vec<NodeRow> {
        self.pre_order_iter()
            .map(|node| NodeRow {
                tree: self.name().to_string(),
                node: node.id(),
                parent: node.parent(),
                age: node.age(),
                taxon: node.taxon().to_string(),
            })
            .collect()
    }
}

impl Collection {
    /// Returns the rows of all trees, tree by tree in name order.
    pub fn to_rows(&self) -> Vec<NodeRow> {
        self.iter().flat_map(Tree::to_rows).collect()
    }

    /// Builds a collection from rows; see [RowLoader].
    ///
    /// # Errors
    /// The first error raised by [RowLoader::push] or [RowLoader::finish].
    pub fn from_rows<I: IntoIterator<Item = NodeRow>>(rows: I) -> Result<Collection, TreeError> {
        let mut loader = RowLoader::new();
        for row in rows {
            loader.push(row)?;
        }
        loader.finish()
    }
}

// =#========================================================================#=
// ROW LOADER
// =#========================================================================#=
/// Incremental builder of a [Collection] from [NodeRow]s.
///
/// The first row of each tree must be its root; every later row must name
/// a parent that was already loaded. Node IDs of the rows are only used to
/// link parents and children, the loaded trees get canonical IDs.
#[derive(Debug, Default)]
pub struct RowLoader {
    trees: Vec<LoadingTree>,
    index: HashMap<String, usize>,
}

#[derive(Debug)]
struct LoadingTree {
    tree: Tree,
    /// Row node ID to ID in `tree`
    ids: HashMap<NodeId, NodeId>,
}

impl RowLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one row.
    ///
    /// # Errors
    /// * [TreeError::MissingTreeName] if the tree name is blank
    /// * [TreeError::NoParent] if the parent was not loaded before
    ///   (including a first row of a tree that is not a root)
    /// * [TreeError::RepeatedNode] if the node ID was already loaded
    /// * [TreeError::RepeatedRoot] if a tree gets a second root
    /// * [TreeError::OlderAge] if the node is older than its parent
    /// * [TreeError::RepeatedTaxon] if the taxon is already in the tree
    pub fn push(&mut self, row: NodeRow) -> Result<(), TreeError> {
        let name = canonical_name(&row.tree);
        if name.is_empty() {
            return Err(TreeError::MissingTreeName);
        }

        let index = match self.index.get(&name) {
            Some(&index) => index,
            None => return self.start_tree(name, row),
        };

        let LoadingTree { tree, ids } = &mut self.trees[index];
        if ids.contains_key(&row.node) {
            return Err(TreeError::RepeatedNode(row.node));
        }
        let parent = row.parent.ok_or(TreeError::RepeatedRoot(row.node))?;
        let &parent_id = ids.get(&parent).ok_or(TreeError::NoParent(parent))?;
        let parent_age = tree.age(parent_id).ok_or(TreeError::NoParent(parent))?;
        if row.age > parent_age {
            return Err(TreeError::OlderAge {
                id: row.node,
                age: row.age,
                parent_age,
            });
        }

        let id = tree.add(parent_id, parent_age - row.age, &row.taxon)?;
        ids.insert(row.node, id);
        Ok(())
    }

    fn start_tree(&mut self, name: String, row: NodeRow) -> Result<(), TreeError> {
        if let Some(parent) = row.parent {
            return Err(TreeError::NoParent(parent));
        }
        let mut tree = Tree::new(&name, row.age);
        if !row.taxon.trim().is_empty() {
            tree.set_name(tree.root(), &row.taxon)?;
        }
        let ids = HashMap::from([(row.node, tree.root())]);
        self.index.insert(name, self.trees.len());
        self.trees.push(LoadingTree { tree, ids });
        Ok(())
    }

    /// Validates and formats all loaded trees.
    ///
    /// # Errors
    /// The [validation](Tree::validate) error of the first invalid tree.
    pub fn finish(self) -> Result<Collection, TreeError> {
        let mut collection = Collection::new();
        for LoadingTree { mut tree, .. } in self.trees {
            tree.validate()?;
            tree.format();
            debug!(tree = %tree.name(), nodes = tree.num_nodes(), "loaded tree from rows");
            collection.add(tree)?;
        }
        Ok(collection)
    }
}
