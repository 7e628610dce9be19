//! Reading collections from tab-separated tables.

use super::{COLUMNS, COMMENT, NO_PARENT};
use crate::model::{Age, Collection, NodeId, NodeRow, RowLoader};
use crate::parser::{ParsingError, ParsingErrorType};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads a collection from a table.
///
/// # Errors
/// * [ParsingErrorType::InvalidTableHeader] if there is no header or a
///   column is missing
/// * [ParsingErrorType::InvalidRow] if a field cannot be read
/// * [ParsingErrorType::RejectedRow] if a row does not fit its tree
/// * [ParsingErrorType::Tree] if a loaded tree is invalid
/// * [ParsingErrorType::IoError] if reading fails
///
/// # Example
/// ```
/// let table = "tree\tnode\tparent\tage\ttaxon
/// amniota\t0\t-1\t324000000\t
/// amniota\t1\t0\t0\tGallus gallus
/// amniota\t2\t0\t0\tHomo sapiens
/// ";
/// let trees = timetree::tsv::read(table.as_bytes())?;
///
/// let tree = trees.get("Amniota").unwrap();
/// assert_eq!(tree.total_len(), 648_000_000);
/// # Ok::<(), timetree::parser::ParsingError>(())
/// ```
pub fn read<R: Read>(reader: R) -> Result<Collection, ParsingError> {
    let mut records = BufReader::new(reader)
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !is_skipped(l)));

    let (_, header) = records
        .next()
        .ok_or_else(|| table_header_error("missing header".to_string()))?;
    let columns = Columns::from_header(&header?)?;

    let mut loader = RowLoader::new();
    for (line, record) in records {
        let record = record?;
        let row = columns
            .row(&record)
            .map_err(|msg| ParsingError::without_context(ParsingErrorType::InvalidRow { line, msg }))?;
        loader
            .push(row)
            .map_err(|source| ParsingError::without_context(ParsingErrorType::RejectedRow { line, source }))?;
    }
    Ok(loader.finish()?)
}

/// Reads a collection from a table file.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Collection, ParsingError> {
    read(File::open(path)?)
}

fn is_skipped(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(COMMENT)
}

fn table_header_error(msg: String) -> ParsingError {
    ParsingError::without_context(ParsingErrorType::InvalidTableHeader(msg))
}

/// Field index of every column.
#[derive(Debug)]
struct Columns {
    tree: usize,
    node: usize,
    parent: usize,
    age: usize,
    taxon: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, ParsingError> {
        let fields: Vec<&str> = header.split('\t').map(str::trim).collect();
        let mut indices = [0; COLUMNS.len()];
        for (index, column) in indices.iter_mut().zip(COLUMNS) {
            *index = fields
                .iter()
                .position(|f| f.eq_ignore_ascii_case(column))
                .ok_or_else(|| table_header_error(format!("missing column '{column}'")))?;
        }
        let [tree, node, parent, age, taxon] = indices;
        Ok(Self {
            tree,
            node,
            parent,
            age,
            taxon,
        })
    }

    /// Reads a row; the error is a message for [ParsingErrorType::InvalidRow].
    fn row(&self, record: &str) -> Result<NodeRow, String> {
        let fields: Vec<&str> = record.trim_end_matches('\r').split('\t').collect();
        let field = |index: usize, column: &str| {
            fields
                .get(index)
                .map(|f| f.trim())
                .ok_or_else(|| format!("missing field '{column}'"))
        };

        let tree = field(self.tree, "tree")?.to_string();
        let node = field(self.node, "node")?;
        let node = node.parse::<NodeId>().map_err(|_| format!("invalid node ID '{node}'"))?;
        let parent = match field(self.parent, "parent")? {
            "" | NO_PARENT => None,
            parent => Some(parent.parse::<NodeId>().map_err(|_| format!("invalid parent ID '{parent}'"))?),
        };
        let age = field(self.age, "age")?;
        let age = age.parse::<Age>().map_err(|_| format!("invalid age '{age}'"))?;
        // Trailing empty taxa may have been stripped
        let taxon = field(self.taxon, "taxon").unwrap_or_default().to_string();

        Ok(NodeRow {
            tree,
            node,
            parent,
            age,
            taxon,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_columns_in_any_order() {
        let columns = Columns::from_header("Taxon\tAGE\tparent\tnode\ttree").unwrap();
        let row = columns.row("Gallus gallus\t0\t0\t1\tamniota").unwrap();
        assert_eq!(
            row,
            NodeRow {
                tree: "amniota".to_string(),
                node: 1,
                parent: Some(0),
                age: 0,
                taxon: "Gallus gallus".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_column() {
        let err = Columns::from_header("tree\tnode\tage\ttaxon").unwrap_err();
        assert_eq!(
            err.kind(),
            &ParsingErrorType::InvalidTableHeader("missing column 'parent'".to_string())
        );
    }

    #[test]
    fn test_root_parent() {
        let columns = Columns::from_header("tree\tnode\tparent\tage\ttaxon").unwrap();
        assert_eq!(columns.row("t\t0\t-1\t10\t").unwrap().parent, None);
        assert_eq!(columns.row("t\t0\t\t10").unwrap().parent, None);
    }

    #[test]
    fn test_invalid_fields() {
        let columns = Columns::from_header("tree\tnode\tparent\tage\ttaxon").unwrap();
        assert_eq!(columns.row("t\tx\t-1\t10\t"), Err("invalid node ID 'x'".to_string()));
        assert_eq!(columns.row("t\t1\t0\t-10\tA"), Err("invalid age '-10'".to_string()));
        assert_eq!(columns.row("t\t1"), Err("missing field 'parent'".to_string()));
    }
}
