//! Time-calibrated tree on an arena of [Node]s.
//!
//! A [Tree] owns all of its nodes in a vector indexed by [NodeId]. Nodes
//! only refer to each other by ID, so edits are index surgery on the arena.
//! IDs are handed out sequentially and never reused until [Tree::format]
//! renumbers the nodes canonically.

use crate::model::canon::canonical_name;
use crate::model::error::TreeError;
use crate::model::node::{Age, Node, NodeId};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::ops::Index;
use tracing::trace;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted tree whose nodes carry absolute ages in years before present.
///
/// Branch lengths are age differences between a node and its parent, so an
/// age change of one node implicitly changes the branch lengths around it.
///
/// # Invariants
/// - Exactly one root; every other node is reachable from it.
/// - `age(parent) >= age(child)` for every edge.
/// - Taxon names are unique within the tree.
/// - No node has exactly one child and every terminal is named, *once
///   [validated](Tree::validate)*; edits may pass through states that break
///   these two.
///
/// # Example
/// ```
/// use timetree::model::Tree;
///
/// let mut tree = Tree::new("hominini", 6_300_000);
/// let pan = tree.add(0, 6_300_000, "Pan")?;
/// let homo = tree.add(0, 5_800_000, "Homo")?;
/// tree.add(homo, 500_000, "homo sapiens")?;
///
/// assert_eq!(tree.age(pan), Some(0));
/// assert_eq!(tree.tax_node("HOMO  SAPIENS"), Some(3));
/// # Ok::<(), timetree::model::TreeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    name: String,
    /// Arena; deleted nodes leave a `None` slot until the next format
    nodes: Vec<Option<Node>>,
    root: NodeId,
    taxa: HashMap<String, NodeId>,
    num_nodes: usize,
}

// ============================================================================
// Construction, Accessors (pub)
// ============================================================================
impl Tree {
    /// Creates a tree consisting of a single unnamed root.
    ///
    /// # Arguments
    /// * `name` - Name of the tree, stored in canonical form
    /// * `root_age` - Age of the root in years
    pub fn new(name: &str, root_age: Age) -> Self {
        Self::with_root(name, root_age, String::new())
    }

    fn with_root(name: &str, root_age: Age, taxon: String) -> Self {
        let mut taxa = HashMap::new();
        if !taxon.is_empty() {
            taxa.insert(taxon.clone(), 0);
        }
        Tree {
            name: canonical_name(name),
            nodes: vec![Some(Node::new(0, None, root_age, taxon))],
            root: 0,
            taxa,
            num_nodes: 1,
        }
    }

    /// Returns the (canonical) name of the tree.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ID of the root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the age of the root, which is the oldest age in the tree.
    pub fn root_age(&self) -> Age {
        self[self.root].age
    }

    /// Returns the node with the given ID, if it is in the tree.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of nodes with children (the root included).
    pub fn num_internal(&self) -> usize {
        self.live().filter(|n| !n.is_term()).count()
    }

    /// Returns the number of terminals.
    pub fn num_terms(&self) -> usize {
        self.live().filter(|n| n.is_term()).count()
    }

    fn live(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().flatten()
    }

    /// Mutable access to a node known to be in the arena.
    fn slot_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("node {id} not in tree {}", self.name),
        }
    }

    /// Appends a new node to the arena and registers its taxon.
    ///
    /// Does not link the node into the children of `parent`.
    fn push_node(&mut self, parent: Option<NodeId>, age: Age, taxon: String) -> NodeId {
        let id = self.nodes.len();
        if !taxon.is_empty() {
            self.taxa.insert(taxon.clone(), id);
        }
        self.nodes.push(Some(Node::new(id, parent, age, taxon)));
        self.num_nodes += 1;
        id
    }

    /// Removes a single node from the arena (not its descendants).
    fn release(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.get_mut(id)?.take()?;
        if !node.taxon.is_empty() {
            self.taxa.remove(&node.taxon);
        }
        self.num_nodes -= 1;
        Some(node)
    }

    fn release_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.release(current) {
                stack.extend(node.children);
            }
        }
    }

    fn check_taxon_free(&self, taxon: &str) -> Result<(), TreeError> {
        if !taxon.is_empty() && self.taxa.contains_key(taxon) {
            return Err(TreeError::RepeatedTaxon(taxon.to_string()));
        }
        Ok(())
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    /// # Panics
    /// Panics if there is no node with the given ID; use [Tree::node] to check.
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.node(id) {
            Some(node) => node,
            None => panic!("node {id} not in tree {}", self.name),
        }
    }
}

// ============================================================================
// Edits (pub)
// ============================================================================
impl Tree {
    /// Adds a new child below `parent`.
    ///
    /// # Arguments
    /// * `parent` - ID of the parent node
    /// * `branch_length` - Length of the new edge in years; the new node gets
    ///   age `age(parent) - branch_length`
    /// * `name` - Taxon name (canonicalized), may be empty
    ///
    /// # Returns
    /// The ID of the new node.
    ///
    /// # Errors
    /// * [TreeError::NoParent] if `parent` is not in the tree
    /// * [TreeError::RepeatedTaxon] if the name is already used
    /// * [TreeError::InvalidBranchLength] if the new age would be negative
    pub fn add(&mut self, parent: NodeId, branch_length: Age, name: &str) -> Result<NodeId, TreeError> {
        let parent_age = self.node(parent).ok_or(TreeError::NoParent(parent))?.age;
        let taxon = canonical_name(name);
        self.check_taxon_free(&taxon)?;
        let age = parent_age.checked_sub(branch_length).ok_or(TreeError::InvalidBranchLength {
            branch_length,
            parent_age,
        })?;

        let id = self.push_node(Some(parent), age, taxon);
        self.slot_mut(parent).children.push(id);
        trace!(tree = %self.name, id, parent, age, "added node");
        Ok(id)
    }

    /// Adds a named node as sister of `sister`.
    ///
    /// A new internal node of age `age + branch_length` takes the place of
    /// `sister` below its old parent; its children are `sister` and the new
    /// named node of age `age`, in that order. The internal node gets the
    /// next free ID, the named node the one after.
    ///
    /// # Returns
    /// The ID of the new named node.
    ///
    /// # Errors
    /// * [TreeError::NoSister] if `sister` is not in the tree
    /// * [TreeError::RootSister] if `sister` is the root
    /// * [TreeError::RepeatedTaxon] if the name is already used
    /// * [TreeError::YoungerAge] if the new internal node would be younger than `sister`
    /// * [TreeError::OlderAge] if it would not be strictly younger than the old parent
    pub fn add_sister(
        &mut self,
        sister: NodeId,
        age: Age,
        branch_length: Age,
        name: &str,
    ) -> Result<NodeId, TreeError> {
        let sister_node = self.node(sister).ok_or(TreeError::NoSister(sister))?;
        let old_parent = sister_node.parent.ok_or(TreeError::RootSister(sister))?;
        let sister_age = sister_node.age;

        let taxon = canonical_name(name);
        self.check_taxon_free(&taxon)?;

        let ancestor_age = age.saturating_add(branch_length);
        if ancestor_age < sister_age {
            return Err(TreeError::YoungerAge {
                id: sister,
                age: ancestor_age,
                child_age: sister_age,
            });
        }
        let old_parent_age = self[old_parent].age;
        if ancestor_age >= old_parent_age {
            return Err(TreeError::OlderAge {
                id: sister,
                age: ancestor_age,
                parent_age: old_parent_age,
            });
        }

        let ancestor = self.push_node(Some(old_parent), ancestor_age, String::new());
        let id = self.push_node(Some(ancestor), age, taxon);
        if let Some(slot) = self.slot_mut(old_parent).children.iter_mut().find(|c| **c == sister) {
            *slot = ancestor;
        }
        self.slot_mut(sister).parent = Some(ancestor);
        self.slot_mut(ancestor).children = vec![sister, id];

        trace!(tree = %self.name, id, sister, ancestor, "added sister");
        Ok(id)
    }

    /// Deletes a node together with its subtree.
    ///
    /// If the parent of the node is binary, the parent collapses as well and
    /// the remaining sibling takes its place (becoming the root if the parent
    /// was the root). Otherwise the node is removed from the children of its
    /// parent, keeping the order of the remaining siblings. Deleting an
    /// unknown ID does nothing.
    ///
    /// # Errors
    /// [TreeError::RootDeletion] if `id` is the root.
    pub fn delete(&mut self, id: NodeId) -> Result<(), TreeError> {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let parent = node.parent.ok_or(TreeError::RootDeletion(id))?;

        let siblings: Vec<NodeId> = self[parent].children.iter().copied().filter(|&c| c != id).collect();
        if let &[sister] = siblings.as_slice() {
            match self[parent].parent {
                Some(grand) => {
                    if let Some(slot) = self.slot_mut(grand).children.iter_mut().find(|c| **c == parent) {
                        *slot = sister;
                    }
                    self.slot_mut(sister).parent = Some(grand);
                }
                None => {
                    self.slot_mut(sister).parent = None;
                    self.root = sister;
                }
            }
            self.release(parent);
        } else {
            self.slot_mut(parent).children = siblings;
        }

        self.release_subtree(id);
        trace!(tree = %self.name, id, "deleted subtree");
        Ok(())
    }

    /// Sets the age of the root to `new_root_age`, shifting every node by the
    /// same amount so that all branch lengths stay the same.
    ///
    /// # Errors
    /// [TreeError::InvalidRootAge] if `new_root_age` is below the longest
    /// root-to-terminal length ([Tree::max_len]).
    pub fn move_root(&mut self, new_root_age: Age) -> Result<(), TreeError> {
        let youngest = self.youngest_age();
        let max_len = self.root_age() - youngest;
        if new_root_age < max_len {
            return Err(TreeError::InvalidRootAge {
                age: new_root_age,
                min_age: max_len,
            });
        }

        let shift = new_root_age - max_len;
        for node in self.nodes.iter_mut().flatten() {
            node.age = node.age - youngest + shift;
        }
        Ok(())
    }

    /// Sets the age of a single node, keeping the ages of all other nodes.
    ///
    /// Unknown IDs are ignored.
    ///
    /// # Errors
    /// * [TreeError::OlderAge] if `age` exceeds the age of the parent
    /// * [TreeError::YoungerAge] if `age` is below the age of the oldest child
    pub fn set_age(&mut self, id: NodeId, age: Age) -> Result<(), TreeError> {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        if let Some(parent) = node.parent {
            let parent_age = self[parent].age;
            if age > parent_age {
                return Err(TreeError::OlderAge { id, age, parent_age });
            }
        }
        if let Some(child_age) = node.children.iter().map(|&c| self[c].age).max() {
            if child_age > age {
                return Err(TreeError::YoungerAge { id, age, child_age });
            }
        }

        self.slot_mut(id).age = age;
        Ok(())
    }

    /// Renames a node; an empty (or blank) name removes the taxon.
    ///
    /// Unknown IDs are ignored.
    ///
    /// # Errors
    /// * [TreeError::UnnamedTerminal] when removing the name of a terminal
    /// * [TreeError::RepeatedTaxon] if another node already has the name
    pub fn set_name(&mut self, id: NodeId, name: &str) -> Result<(), TreeError> {
        let Some(node) = self.node(id) else {
            return Ok(());
        };
        let taxon = canonical_name(name);
        if taxon.is_empty() {
            if node.is_term() {
                return Err(TreeError::UnnamedTerminal(id));
            }
        } else if let Some(&other) = self.taxa.get(&taxon) {
            if other != id {
                return Err(TreeError::RepeatedTaxon(taxon));
            }
            return Ok(());
        }

        let old = std::mem::replace(&mut self.slot_mut(id).taxon, taxon.clone());
        if !old.is_empty() {
            self.taxa.remove(&old);
        }
        if !taxon.is_empty() {
            self.taxa.insert(taxon, id);
        }
        Ok(())
    }

    /// Renames several nodes at once.
    ///
    /// Names are checked against the taxa after all renames, so names may be
    /// swapped between the given nodes. Unknown IDs are ignored. On error the
    /// tree is left unchanged.
    ///
    /// # Errors
    /// Same as [Tree::set_name].
    pub fn set_names<S: AsRef<str>>(&mut self, names: &[(NodeId, S)]) -> Result<(), TreeError> {
        let names: Vec<(NodeId, &str)> = names
            .iter()
            .filter(|(id, _)| self.node(*id).is_some())
            .map(|(id, name)| (*id, name.as_ref()))
            .collect();

        let mut taxa = self.taxa.clone();
        for &(id, _) in &names {
            taxa.remove(&self[id].taxon);
        }
        let mut renamed = Vec::with_capacity(names.len());
        for (id, name) in names {
            let taxon = canonical_name(name);
            if taxon.is_empty() {
                if self[id].is_term() {
                    return Err(TreeError::UnnamedTerminal(id));
                }
            } else if taxa.insert(taxon.clone(), id).is_some_and(|other| other != id) {
                return Err(TreeError::RepeatedTaxon(taxon));
            }
            renamed.push((id, taxon));
        }

        for (id, taxon) in renamed {
            self.slot_mut(id).taxon = taxon;
        }
        self.taxa = taxa;
        Ok(())
    }

    /// Sorts the children of every node and renumbers all nodes in pre-order.
    ///
    /// Children are ordered by number of terminals (fewer first), then by age
    /// (older first), then by the smallest terminal name in their subtree.
    /// Afterwards the IDs are `0..num_nodes()` with the root at `0`, and the
    /// assignment depends only on the shape, ages and names of the tree.
    /// Formatting a formatted tree does not change it.
    pub fn format(&mut self) {
        let slots = self.nodes.len();

        // Terminal count and smallest terminal name per subtree
        let mut size = vec![0usize; slots];
        let mut first = vec![0usize; slots];
        for node in self.post_order_iter() {
            if node.is_term() {
                size[node.id] = 1;
                first[node.id] = node.id;
            } else {
                size[node.id] = node.children.iter().map(|&c| size[c]).sum();
                first[node.id] = node
                    .children
                    .iter()
                    .map(|&c| first[c])
                    .min_by(|&a, &b| self[a].taxon.cmp(&self[b].taxon))
                    .unwrap_or(node.id);
            }
        }

        let compare = |a: NodeId, b: NodeId| -> Ordering {
            size[a]
                .cmp(&size[b])
                .then_with(|| self[b].age.cmp(&self[a].age))
                .then_with(|| self[first[a]].taxon.cmp(&self[first[b]].taxon))
        };
        let sorted: Vec<(NodeId, Vec<NodeId>)> = self
            .live()
            .filter(|n| n.children.len() > 1)
            .map(|n| {
                let mut children = n.children.clone();
                children.sort_by(|&a, &b| compare(a, b));
                (n.id, children)
            })
            .collect();
        for (id, children) in sorted {
            self.slot_mut(id).children = children;
        }

        // Renumber in pre-order
        let order: Vec<NodeId> = self.pre_order_iter().map(Node::id).collect();
        let mut new_id = vec![0; slots];
        for (new, &old) in order.iter().enumerate() {
            new_id[old] = new;
        }

        let mut old_nodes = std::mem::take(&mut self.nodes);
        let mut nodes = Vec::with_capacity(order.len());
        for &old in &order {
            if let Some(mut node) = old_nodes[old].take() {
                node.id = new_id[old];
                node.parent = node.parent.map(|p| new_id[p]);
                for child in node.children.iter_mut() {
                    *child = new_id[*child];
                }
                nodes.push(Some(node));
            }
        }

        self.nodes = nodes;
        self.root = 0;
        self.num_nodes = order.len();
        self.taxa = self
            .live()
            .filter(|n| !n.taxon.is_empty())
            .map(|n| (n.taxon.clone(), n.id))
            .collect();
    }

    /// Copies the subtree rooted at `id` into a new, formatted tree.
    ///
    /// Ages are kept, so the root of the new tree has the age of `id`. The new
    /// tree is named `name` if given and not blank, else after the taxon of
    /// `id`, else `"<tree name>:node-<id>"`.
    ///
    /// # Returns
    /// `None` if `id` is not in the tree.
    pub fn sub_tree(&self, id: NodeId, name: Option<&str>) -> Option<Tree> {
        let node = self.node(id)?;
        let name = match name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ if !node.taxon.is_empty() => node.taxon.clone(),
            _ => format!("{}:node-{}", self.name, id),
        };

        let mut tree = Tree::with_root(&name, node.age, node.taxon.clone());
        let mut stack = vec![(id, tree.root)];
        while let Some((old, new)) = stack.pop() {
            for &child in &self[old].children {
                let c = &self[child];
                let copy = tree.push_node(Some(new), c.age, c.taxon.clone());
                tree.slot_mut(new).children.push(copy);
                stack.push((child, copy));
            }
        }

        tree.format();
        Some(tree)
    }

    /// Checks the invariants that edits may transiently break.
    ///
    /// # Errors
    /// * [TreeError::SingleChild] if a node has exactly one child
    /// * [TreeError::UnnamedTerminal] otherwise, if a terminal has no taxon
    pub fn validate(&self) -> Result<(), TreeError> {
        if let Some(node) = self.live().find(|n| n.children.len() == 1) {
            return Err(TreeError::SingleChild(node.id));
        }
        if let Some(node) = self.live().find(|n| n.is_term() && n.taxon.is_empty()) {
            return Err(TreeError::UnnamedTerminal(node.id));
        }
        Ok(())
    }
}

// ============================================================================
// Queries (pub)
// ============================================================================
impl Tree {
    /// Returns the age of a node.
    pub fn age(&self, id: NodeId) -> Option<Age> {
        self.node(id).map(Node::age)
    }

    /// Returns the parent of a node; `None` for the root and unknown IDs.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(Node::parent)
    }

    /// Returns the children of a node in ascending ID order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children = self.node(id).map(|n| n.children.clone()).unwrap_or_default();
        children.sort_unstable();
        children
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_root)
    }

    pub fn is_term(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_term)
    }

    /// Returns the taxon of a node; empty for unnamed nodes and unknown IDs.
    pub fn taxon(&self, id: NodeId) -> &str {
        self.node(id).map(Node::taxon).unwrap_or_default()
    }

    /// Returns the ID of the node with the given taxon name (any case or spacing).
    pub fn tax_node(&self, name: &str) -> Option<NodeId> {
        self.taxa.get(&canonical_name(name)).copied()
    }

    /// Returns all taxon names, terminal or not, sorted.
    pub fn taxa(&self) -> Vec<&str> {
        let mut taxa: Vec<&str> = self.taxa.keys().map(String::as_str).collect();
        taxa.sort_unstable();
        taxa
    }

    /// Returns the taxon names of all named terminals, sorted.
    pub fn terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self
            .live()
            .filter(|n| n.is_term() && !n.taxon.is_empty())
            .map(Node::taxon)
            .collect();
        terms.sort_unstable();
        terms
    }

    /// Returns all node IDs in ascending order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.live().map(Node::id).collect()
    }

    /// Returns the number of edges between the root and a node.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut current = self.node(id)?;
        let mut depth = 0;
        while let Some(parent) = current.parent {
            current = &self[parent];
            depth += 1;
        }
        Some(depth)
    }

    /// Returns the time between the root and a node.
    pub fn len_to_root(&self, id: NodeId) -> Option<Age> {
        self.age(id).map(|age| self.root_age() - age)
    }

    /// Returns the length of the edge to the parent; `None` for the root.
    pub fn branch_length(&self, id: NodeId) -> Option<Age> {
        let node = self.node(id)?;
        let parent = node.parent?;
        Some(self[parent].age - node.age)
    }

    /// Returns the sum of all branch lengths.
    pub fn total_len(&self) -> Age {
        self.live()
            .filter_map(|n| n.parent.map(|p| self[p].age - n.age))
            .sum()
    }

    /// Returns the longest root-to-node length, i.e. the root age minus the
    /// youngest age in the tree.
    pub fn max_len(&self) -> Age {
        self.root_age() - self.youngest_age()
    }

    fn youngest_age(&self) -> Age {
        self.live().map(Node::age).min().unwrap_or_else(|| self.root_age())
    }

    /// Returns the most recent common ancestor of the named nodes.
    ///
    /// # Returns
    /// * `None` if `names` is empty or any name is not in the tree
    /// * the node itself if there is only one name
    ///
    /// # Example
    /// ```
    /// use timetree::model::Tree;
    ///
    /// let mut tree = Tree::new("t", 10);
    /// let inner = tree.add(0, 5, "")?;
    /// let a = tree.add(inner, 5, "A")?;
    /// tree.add(inner, 5, "B")?;
    /// tree.add(0, 10, "C")?;
    ///
    /// assert_eq!(tree.mrca(&["a", "b"]), Some(inner));
    /// assert_eq!(tree.mrca(&["A", "C"]), Some(tree.root()));
    /// assert_eq!(tree.mrca(&["A"]), Some(a));
    /// assert_eq!(tree.mrca(&["A", "D"]), None);
    /// # Ok::<(), timetree::model::TreeError>(())
    /// ```
    pub fn mrca<S: AsRef<str>>(&self, names: &[S]) -> Option<NodeId> {
        let (first, rest) = names.split_first()?;
        let mut common = self.path_from_root(self.tax_node(first.as_ref())?);
        for name in rest {
            let path = self.path_from_root(self.tax_node(name.as_ref())?);
            let shared = common.iter().zip(&path).take_while(|(a, b)| a == b).count();
            common.truncate(shared);
        }
        common.last().copied()
    }

    /// Returns the IDs from the root down to `id`, both included.
    fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
impl Tree {
    /// Returns an iterator over the nodes in post-order (children before parents).
    ///
    /// Children are visited in their current order.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter {
            tree: self,
            stack: vec![(self.root, false)],
        }
    }

    /// Returns an iterator over the nodes in pre-order (parents before children).
    ///
    /// After [Tree::format], this visits the nodes in ascending ID order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter {
            tree: self,
            stack: vec![self.root],
        }
    }
}

/// Iterator for post-order traversal on an explicit stack.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, bool)>, // (id, children_visited)
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((id, children_visited)) = self.stack.pop() {
            let node = &self.tree[id];
            if children_visited || node.is_term() {
                return Some(node);
            }

            self.stack.push((id, true));
            // Reversed, so the first child is visited first
            self.stack.extend(node.children.iter().rev().map(|&c| (c, false)));
        }
        None
    }
}

/// Iterator for pre-order traversal on an explicit stack.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree[id];
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
