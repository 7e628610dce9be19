//! Namespace of uniquely named trees.

use crate::model::canon::canonical_name;
use crate::model::error::TreeError;
use crate::model::tree::Tree;
use std::collections::BTreeMap;

/// A set of [Tree]s keyed by their canonical name.
///
/// Trees are kept in name order. Once added, a tree can only be changed
/// through its own edit operations (via [Collection::get_mut]), which never
/// change its name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    trees: BTreeMap<String, Tree>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tree under its name.
    ///
    /// # Errors
    /// * [TreeError::MissingTreeName] if the tree has an empty name
    /// * [TreeError::RepeatedTree] if a tree with the same name is present
    pub fn add(&mut self, tree: Tree) -> Result<(), TreeError> {
        let name = tree.name().to_string();
        if name.is_empty() {
            return Err(TreeError::MissingTreeName);
        }
        if self.trees.contains_key(&name) {
            return Err(TreeError::RepeatedTree(name));
        }
        self.trees.insert(name, tree);
        Ok(())
    }

    /// Returns the tree with the given name (any case or spacing).
    pub fn get(&self, name: &str) -> Option<&Tree> {
        self.trees.get(&canonical_name(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tree> {
        self.trees.get_mut(&canonical_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.trees.contains_key(&canonical_name(name))
    }

    /// Removes and returns the tree with the given name.
    pub fn remove(&mut self, name: &str) -> Option<Tree> {
        self.trees.remove(&canonical_name(name))
    }

    /// Returns the names of all trees, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.trees.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Returns an iterator over the trees in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Tree> {
        self.trees.values()
    }

    /// Returns the first name of the form `base`, `base.1`, `base.2`, ...
    /// that is not yet taken.
    pub(crate) fn free_name(&self, base: &str) -> String {
        let base = canonical_name(base);
        if !self.trees.contains_key(&base) {
            return base;
        }
        let mut n = 1;
        loop {
            let name = format!("{base}.{n}");
            if !self.trees.contains_key(&name) {
                return name;
            }
            n += 1;
        }
    }
}

impl IntoIterator for Collection {
    type Item = Tree;
    type IntoIter = std::collections::btree_map::IntoValues<String, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.into_values()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Tree;
    type IntoIter = std::collections::btree_map::Values<'a, String, Tree>;

    fn into_iter(self) -> Self::IntoIter {
        self.trees.values()
    }
}
