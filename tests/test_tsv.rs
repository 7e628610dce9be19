mod common;

use common::{DINO_NODES, assert_nodes, dinos, fixture};
use pretty_assertions::assert_eq;
use timetree::model::{Collection, NodeRow, Tree, TreeError};
use timetree::parser::ParsingErrorType;
use timetree::tsv;

fn amniota() -> Tree {
    let mut tree = Tree::new("amniota", 324_000_000);
    tree.add(0, 324_000_000, "Homo sapiens").unwrap();
    tree.add(0, 324_000_000, "Gallus gallus").unwrap();
    tree.format();
    tree
}

#[test]
fn test_read() {
    let trees = tsv::read_file(fixture("dinosauria.tsv")).unwrap();
    assert_eq!(trees.names(), vec!["Dinos"]);
    assert_nodes(trees.get("dinos").unwrap(), DINO_NODES);
}

#[test]
fn test_write() {
    let mut trees = Collection::new();
    trees.add(amniota()).unwrap();

    let mut out = Vec::new();
    tsv::write(&mut out, &trees).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "# time calibrated phylogenetic trees
tree\tnode\tparent\tage\ttaxon
Amniota\t0\t-1\t324000000\t
Amniota\t1\t0\t0\tGallus gallus
Amniota\t2\t0\t0\tHomo sapiens
"
    );
}

#[test]
fn test_write_and_read() {
    let mut trees = Collection::new();
    trees.add(dinos()).unwrap();
    trees.add(amniota()).unwrap();

    let mut out = Vec::new();
    tsv::write(&mut out, &trees).unwrap();
    assert_eq!(tsv::read(out.as_slice()).unwrap(), trees);
}

#[test]
fn test_read_any_order() {
    // Columns shuffled, IDs not canonical, comments and blank lines
    let table = "# shuffled
TAXON\tAge\tParent\tNode\tTree

\t324000000\t-1\t7\tamniota
Homo sapiens\t0\t7\t3\tamniota
# a comment in between
Gallus gallus\t0\t7\t5\tamniota
";
    let trees = tsv::read(table.as_bytes()).unwrap();
    assert_eq!(trees.get("amniota"), Some(&amniota()));
}

#[test]
fn test_rows() {
    let rows = amniota().to_rows();
    assert_eq!(
        rows[1],
        NodeRow {
            tree: "Amniota".to_string(),
            node: 1,
            parent: Some(0),
            age: 0,
            taxon: "Gallus gallus".to_string(),
        }
    );

    let trees = Collection::from_rows(rows).unwrap();
    assert_eq!(trees.get("amniota"), Some(&amniota()));
}

#[test]
fn test_errors() {
    let header = "tree\tnode\tparent\tage\ttaxon\n";
    let cases: Vec<(String, ParsingErrorType)> = vec![
        (
            String::new(),
            ParsingErrorType::InvalidTableHeader("missing header".to_string()),
        ),
        (
            "# only a comment\n".to_string(),
            ParsingErrorType::InvalidTableHeader("missing header".to_string()),
        ),
        (
            "tree\tnode\tparent\ttaxon\n".to_string(),
            ParsingErrorType::InvalidTableHeader("missing column 'age'".to_string()),
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t1\t0\tyoung\tA\n"),
            ParsingErrorType::InvalidRow {
                line: 3,
                msg: "invalid age 'young'".to_string(),
            },
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t1\t5\t0\tA\n"),
            ParsingErrorType::RejectedRow {
                line: 3,
                source: TreeError::NoParent(5),
            },
        ),
        (
            format!("{header}t\t1\t0\t0\tA\n"),
            ParsingErrorType::RejectedRow {
                line: 2,
                source: TreeError::NoParent(0),
            },
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t1\t-1\t5\t\n"),
            ParsingErrorType::RejectedRow {
                line: 3,
                source: TreeError::RepeatedRoot(1),
            },
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t0\t0\t5\tA\n"),
            ParsingErrorType::RejectedRow {
                line: 3,
                source: TreeError::RepeatedNode(0),
            },
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t1\t0\t20\tA\n"),
            ParsingErrorType::RejectedRow {
                line: 3,
                source: TreeError::OlderAge {
                    id: 1,
                    age: 20,
                    parent_age: 10,
                },
            },
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t1\t0\t0\tA\nt\t2\t0\t0\ta\n"),
            ParsingErrorType::RejectedRow {
                line: 4,
                source: TreeError::RepeatedTaxon("A".to_string()),
            },
        ),
        (
            format!("{header}\t0\t-1\t10\t\n"),
            ParsingErrorType::RejectedRow {
                line: 2,
                source: TreeError::MissingTreeName,
            },
        ),
        (
            format!("{header}t\t0\t-1\t10\t\nt\t1\t0\t0\tA\n"),
            ParsingErrorType::Tree(TreeError::SingleChild(0)),
        ),
    ];

    for (table, expected) in cases {
        let err = tsv::read(table.as_bytes()).unwrap_err();
        assert_eq!(err.kind(), &expected, "reading {table:?}");
    }
}
