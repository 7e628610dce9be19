mod common;

use common::{DINO_NODES, DINO_TERMS, DINO_TOTAL_LEN, assert_nodes, dinos, fixture};
use pretty_assertions::assert_eq;
use timetree::model::TreeError;
use timetree::nexus::{NexusBlock, NexusParser, parse_reader, parse_str};
use timetree::parser::{ByteParser, ParsingErrorType};
use timetree::parse_nexus_file;

#[test]
fn test_translate_and_repeated_names() {
    let trees = parse_nexus_file(fixture("dinosauria.nex")).unwrap();
    assert_eq!(trees.names(), vec!["Untitled", "Untitled.1"]);

    for tree in &trees {
        assert_nodes(tree, DINO_NODES);
        assert_eq!(tree.terms(), DINO_TERMS);
        assert_eq!(tree.total_len(), DINO_TOTAL_LEN);
    }

    // Same nodes as the table, up to the tree name
    let expected: Vec<_> = dinos()
        .to_rows()
        .into_iter()
        .map(|row| (row.node, row.parent, row.age, row.taxon))
        .collect();
    let parsed: Vec<_> = trees
        .get("untitled.1")
        .unwrap()
        .to_rows()
        .into_iter()
        .map(|row| (row.node, row.parent, row.age, row.taxon))
        .collect();
    assert_eq!(parsed, expected);
}

#[test]
fn test_from_reader() {
    let file = std::fs::File::open(fixture("dinosauria.nex")).unwrap();
    let trees = parse_reader(file).unwrap();
    assert_eq!(trees.len(), 2);
}

#[test]
fn test_without_translate() {
    let nexus = "#nexus
[written by hand]
begin trees;
    tree amniota = [&U] (Gallus_gallus:324,(Macropus_fuliginosus:176,(Macaca_mulatta:25,'Homo sapiens':25):151):148);
end;
";
    let trees = parse_str(nexus).unwrap();
    let tree = trees.get("amniota").unwrap();
    assert_eq!(tree.root_age(), 324_000_000);
    assert_eq!(
        tree.terms(),
        vec!["Gallus gallus", "Homo sapiens", "Macaca mulatta", "Macropus fuliginosus"]
    );
}

#[test]
fn test_root_age() {
    let nexus = "#NEXUS
BEGIN TREES;
    TRANSLATE 1 A, 2 'B b';
    TREE t = (1:1,2:2);
ENDBLOCK;
";
    let trees = NexusParser::new()
        .with_root_age(5_000_000)
        .parse(ByteParser::for_str(nexus))
        .unwrap();
    let tree = trees.get("t").unwrap();
    assert_eq!(tree.root_age(), 5_000_000);
    assert_eq!(tree.age(tree.tax_node("B b").unwrap()), Some(3_000_000));
    assert_eq!(tree.age(tree.tax_node("A").unwrap()), Some(4_000_000));
}

#[test]
fn test_translate_permuting_labels() {
    let nexus = "#NEXUS
BEGIN TREES;
    TRANSLATE 1 '2', 2 '1';
    TREE swapped = (1:1,(2:1,3:1):1);
END;
";
    let trees = parse_str(nexus).unwrap();
    let tree = trees.get("swapped").unwrap();
    assert_eq!(tree.terms(), vec!["1", "2", "3"]);
    assert_eq!(tree.age(tree.tax_node("2").unwrap()), Some(1_000_000));
    assert_eq!(tree.parent(tree.tax_node("1").unwrap()), tree.parent(tree.tax_node("3").unwrap()));
}

#[test]
fn test_skips_other_blocks_and_commands() {
    let nexus = "#NEXUS
BEGIN DATA;
    DIMENSIONS NTAX=2 NCHAR=3;
    FORMAT DATATYPE=DNA;
    MATRIX A ACG B ACT;
END;
BEGIN ASSUMPTIONS;
    OPTIONS DEFTYPE=unord;
ENDBLOCK;
BEGIN TREES;
    TITLE 'some trees';
    LINK TAXA = Taxa1;
    TREE first = (A:1,B:1);
    TREE second = ((A:1,B:1):1,C:2);
END;
";
    let trees = parse_str(nexus).unwrap();
    assert_eq!(trees.names(), vec!["First", "Second"]);
}

#[test]
fn test_block_names() {
    assert_eq!(NexusBlock::from_name("TREES"), NexusBlock::Trees);
    assert_eq!(NexusBlock::from_name("trees"), NexusBlock::Trees);
    assert_eq!(
        NexusBlock::from_name("Taxa"),
        NexusBlock::Skipped("Taxa".to_string())
    );
}

#[test]
fn test_errors() {
    let cases: Vec<(&str, ParsingErrorType)> = vec![
        ("BEGIN TREES; TREE t = (A,B); END;", ParsingErrorType::MissingNexusHeader),
        ("#NEXUSX BEGIN TREES; TREE t = (A,B); END;", ParsingErrorType::MissingNexusHeader),
        ("#NEXUS\nBEGIN TAXA; DIMENSIONS NTAX=2; END;", ParsingErrorType::NoTrees),
        ("#NEXUS\nBEGIN TREES; END;", ParsingErrorType::NoTrees),
        ("#NEXUS\nBEGIN TREES; TREE t = (A,B);", ParsingErrorType::UnexpectedEOF),
        (
            "#NEXUS\nTREES; TREE t = (A,B); END;",
            ParsingErrorType::InvalidFormatting("expected BEGIN, found 'TREES'".to_string()),
        ),
        (
            "#NEXUS\nBEGIN TREES; TRANSLATE 1 A, 3 B; TREE t = (1,3); END;",
            ParsingErrorType::InvalidTranslateCommand("expected key 2, found '3'".to_string()),
        ),
        (
            "#NEXUS\nBEGIN TREES; TRANSLATE 1 A, 2 __; TREE t = (1,2); END;",
            ParsingErrorType::InvalidTranslateCommand("empty taxon for key 2".to_string()),
        ),
        (
            "#NEXUS\nBEGIN TREES; TREE t (A,B); END;",
            ParsingErrorType::InvalidTreesBlock("expected '=' after tree name 't'".to_string()),
        ),
        (
            "#NEXUS\nBEGIN TREES; TREE '  ' = (A,B); END;",
            TreeError::MissingTreeName.into(),
        ),
        (
            "#NEXUS\nBEGIN TREES; TREE t = (A,(B)); END;",
            TreeError::SingleChild(2).into(),
        ),
        (
            "#NEXUS\nBEGIN TREES; TRANSLATE 1 A, 2 B; TREE t = (1,2,B); END;",
            TreeError::RepeatedTaxon("B".to_string()).into(),
        ),
        (
            "#NEXUS\nBEGIN TREES [unclosed; TREE t = (A,B); END;",
            ParsingErrorType::UnclosedComment,
        ),
    ];

    for (nexus, expected) in cases {
        let err = parse_str(nexus).unwrap_err();
        assert_eq!(err.kind(), &expected, "parsing {nexus:?}");
    }
}
