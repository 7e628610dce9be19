//! Shared fixtures and checks for the integration tests.
#![allow(dead_code)]

use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use timetree::model::{Age, NodeId, Tree};

/// Expected node: (id, parent, age, taxon, children, length to root, depth)
pub type NodeCase = (NodeId, Option<NodeId>, Age, &'static str, &'static [NodeId], Age, usize);

/// The six dinosaurs of `fixtures/dinosauria.tsv`, in canonical order.
pub const DINO_NODES: &[NodeCase] = &[
    (0, None, 235_000_000, "", &[1, 2], 0, 0),
    (1, Some(0), 230_000_000, "Eoraptor lunensis", &[], 5_000_000, 1),
    (2, Some(0), 230_000_000, "", &[3, 6], 5_000_000, 1),
    (3, Some(2), 170_000_000, "", &[4, 5], 65_000_000, 2),
    (4, Some(3), 145_000_000, "Ceratosaurus nasicornis", &[], 90_000_000, 3),
    (5, Some(3), 71_000_000, "Carnotaurus sastrei", &[], 164_000_000, 3),
    (6, Some(2), 170_000_000, "", &[7, 8], 65_000_000, 2),
    (7, Some(6), 68_000_000, "Tyrannosaurus rex", &[], 167_000_000, 3),
    (8, Some(6), 160_000_000, "", &[9, 10], 75_000_000, 3),
    (9, Some(8), 150_000_000, "Archaeopteryx lithographica", &[], 85_000_000, 4),
    (10, Some(8), 0, "Passer domesticus", &[], 235_000_000, 4),
];

pub const DINO_TERMS: &[&str] = &[
    "Archaeopteryx lithographica",
    "Carnotaurus sastrei",
    "Ceratosaurus nasicornis",
    "Eoraptor lunensis",
    "Passer domesticus",
    "Tyrannosaurus rex",
];

pub const DINO_TOTAL_LEN: Age = 536_000_000;

pub const DINO_NEWICK: &str = "(Eoraptor_lunensis:5, ((Ceratosaurus_nasicornis:25 'Carnotaurus sastrei':99):60,(Tyrannosaurus_rex:102,(Archaeopteryx_lithographica:10 Passer_domesticus:160):10):60):5);";

pub fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

/// Loads the dinosaur tree from its table.
pub fn dinos() -> Tree {
    let mut trees = timetree::tsv::read_file(fixture("dinosauria.tsv")).unwrap();
    trees.remove("dinos").unwrap()
}

/// Checks every node of the tree against `expected`, plus the
/// consistency of the per-node queries.
pub fn assert_nodes(tree: &Tree, expected: &[NodeCase]) {
    tree.validate().unwrap();
    assert_eq!(tree.root(), 0);

    let actual: Vec<_> = tree
        .nodes()
        .into_iter()
        .map(|id| {
            (
                id,
                tree.parent(id),
                tree.age(id).unwrap(),
                tree.taxon(id).to_string(),
                tree.children(id),
                tree.len_to_root(id).unwrap(),
                tree.depth(id).unwrap(),
            )
        })
        .collect();
    let expected: Vec<_> = expected
        .iter()
        .map(|&(id, parent, age, taxon, children, to_root, depth)| {
            (id, parent, age, taxon.to_string(), children.to_vec(), to_root, depth)
        })
        .collect();
    assert_eq!(actual, expected);

    for id in tree.nodes() {
        assert_eq!(tree.is_root(id), tree.parent(id).is_none(), "is_root of node {id}");
        assert_eq!(tree.is_term(id), tree.children(id).is_empty(), "is_term of node {id}");
        let taxon = tree.taxon(id);
        if !taxon.is_empty() {
            assert_eq!(tree.tax_node(taxon), Some(id), "node of taxon {taxon}");
        }
    }
}
