//! Property-based invariant tests for tree edits.
//!
//! Random edit sequences are applied to the dinosaur tree, checking:
//!
//! 1. No node is older than its parent after any edit.
//! 2. A failed edit leaves the tree unchanged.
//! 3. The taxon index matches the nodes.
//! 4. Formatting a formatted tree does not change it.
//! 5. Valid trees survive writing and reading a table.

mod common;

use common::dinos;
use proptest::prelude::*;
use timetree::model::{Age, Collection, NodeId, Tree};
use timetree::tsv;

// --- HELPERS ---

const MAX_AGE: Age = 400_000_000;

#[derive(Debug, Clone)]
enum Op {
    Add { node: usize, permille: Age },
    AddSister { node: usize, age: Age, branch_length: Age },
    Delete { node: usize },
    SetAge { node: usize, age: Age },
    SetName { node: usize, named: bool },
    Move { age: Age },
    Format,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<usize>(), 0..=1000u64).prop_map(|(node, permille)| Op::Add { node, permille }),
        3 => (any::<usize>(), 0..MAX_AGE, 0..MAX_AGE)
            .prop_map(|(node, age, branch_length)| Op::AddSister { node, age, branch_length }),
        2 => any::<usize>().prop_map(|node| Op::Delete { node }),
        2 => (any::<usize>(), 0..MAX_AGE).prop_map(|(node, age)| Op::SetAge { node, age }),
        1 => (any::<usize>(), any::<bool>()).prop_map(|(node, named)| Op::SetName { node, named }),
        1 => (0..MAX_AGE).prop_map(|age| Op::Move { age }),
        1 => Just(Op::Format),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(), 1..40)
}

/// Picks a live node from an arbitrary index.
fn pick(tree: &Tree, index: usize) -> NodeId {
    let nodes = tree.nodes();
    nodes[index % nodes.len()]
}

/// Applies an edit; `step` makes new taxon names unique.
fn apply(tree: &mut Tree, op: &Op, step: usize) -> bool {
    let name = format!("Taxon {step}");
    match *op {
        Op::Add { node, permille } => {
            let parent = pick(tree, node);
            let branch_length = tree.age(parent).unwrap_or(0) / 1000 * permille;
            tree.add(parent, branch_length, &name).is_ok()
        }
        Op::AddSister {
            node,
            age,
            branch_length,
        } => tree.add_sister(pick(tree, node), age, branch_length, &name).is_ok(),
        Op::Delete { node } => tree.delete(pick(tree, node)).is_ok(),
        Op::SetAge { node, age } => tree.set_age(pick(tree, node), age).is_ok(),
        Op::SetName { node, named } => {
            let name = if named { name.as_str() } else { "" };
            tree.set_name(pick(tree, node), name).is_ok()
        }
        Op::Move { age } => tree.move_root(age).is_ok(),
        Op::Format => {
            tree.format();
            true
        }
    }
}

fn edited(ops: &[Op]) -> Tree {
    let mut tree = dinos();
    for (step, op) in ops.iter().enumerate() {
        apply(&mut tree, op, step);
    }
    tree
}

// --- 1-3. AGES, FAILED EDITS AND THE TAXON INDEX ---

proptest! {
    #[test]
    fn edits_keep_invariants(ops in ops()) {
        let mut tree = dinos();
        for (step, op) in ops.iter().enumerate() {
            let before = tree.clone();
            if !apply(&mut tree, op, step) {
                prop_assert_eq!(&tree, &before, "failed {:?} changed the tree", op);
            }

            for id in tree.nodes() {
                if let Some(parent) = tree.parent(id) {
                    prop_assert!(
                        tree.age(parent) >= tree.age(id),
                        "node {} older than its parent after {:?}", id, op
                    );
                }
                let taxon = tree.taxon(id);
                if !taxon.is_empty() {
                    prop_assert_eq!(tree.tax_node(taxon), Some(id));
                }
            }
            prop_assert_eq!(tree.num_nodes(), tree.nodes().len());
            prop_assert_eq!(tree.taxa().len(), tree.nodes().iter().filter(|&&id| !tree.taxon(id).is_empty()).count());
        }
    }
}

// --- 4. FORMAT IS A FIXED POINT ---

proptest! {
    #[test]
    fn format_is_fixed_point(ops in ops()) {
        let mut tree = edited(&ops);
        tree.format();
        prop_assert_eq!(tree.root(), 0);
        prop_assert_eq!(tree.nodes(), (0..tree.num_nodes()).collect::<Vec<_>>());

        let formatted = tree.clone();
        tree.format();
        prop_assert_eq!(tree, formatted);
    }
}

// --- 5. TABLE ROUND TRIP ---

proptest! {
    #[test]
    fn valid_trees_survive_tables(ops in ops()) {
        let mut tree = edited(&ops);
        prop_assume!(tree.validate().is_ok());
        tree.format();

        let mut trees = Collection::new();
        trees.add(tree).unwrap();
        let mut out = Vec::new();
        tsv::write(&mut out, &trees).unwrap();

        prop_assert_eq!(tsv::read(out.as_slice()).unwrap(), trees);
    }
}
