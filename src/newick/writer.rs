//! Writing trees as Newick strings.
//!
//! Terminal names are [escaped](escape_label) and branch lengths are written
//! in million years with six decimals, i.e. to the year. The root has no
//! branch length, and names of internal nodes are not written.

use crate::model::{Collection, NodeId, Tree, million_from_years};
use crate::parser::utils::escape_label;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Estimated number of characters per node, used to pre-allocate strings
const CHARS_PER_NODE: usize = 24;

/// Step of the iterative Newick writer.
enum Step {
    Visit(NodeId),
    Separator,
    Close(NodeId),
}

/// Converts a tree into a Newick string, ending with `;`.
///
/// # Example
/// ```
/// use timetree::model::Tree;
/// use timetree::newick::to_newick;
///
/// let mut tree = Tree::new("t", 2_000_000);
/// tree.add(0, 2_000_000, "Homo sapiens")?;
/// tree.add(0, 1_500_000, "Pan")?;
/// tree.format();
///
/// assert_eq!(to_newick(&tree), "(Pan:1.500000,Homo_sapiens:2.000000);");
/// # Ok::<(), timetree::model::TreeError>(())
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(tree.num_nodes() * CHARS_PER_NODE);

    let mut stack = vec![Step::Visit(tree.root())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(id) => {
                let node = &tree[id];
                if node.is_term() {
                    newick.push_str(&escape_label(node.taxon()));
                    push_branch_length(&mut newick, tree, id);
                } else {
                    newick.push('(');
                    stack.push(Step::Close(id));
                    for (i, &child) in node.children().iter().enumerate().rev() {
                        stack.push(Step::Visit(child));
                        if i > 0 {
                            stack.push(Step::Separator);
                        }
                    }
                }
            }
            Step::Separator => newick.push(','),
            Step::Close(id) => {
                newick.push(')');
                push_branch_length(&mut newick, tree, id);
            }
        }
    }

    newick.push(';');
    newick
}

fn push_branch_length(newick: &mut String, tree: &Tree, id: NodeId) {
    if let Some(length) = tree.branch_length(id) {
        // Writing into a String cannot fail
        let _ = write!(newick, ":{:.6}", million_from_years(length));
    }
}

/// Writes every tree of the collection as one Newick line, in name order.
pub fn write_newick<W: Write>(writer: W, collection: &Collection) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    for tree in collection {
        writeln!(writer, "{}", to_newick(tree))?;
    }
    writer.flush()
}

/// Writes every tree of the collection to a new file at `path`.
pub fn write_newick_file<P: AsRef<Path>>(path: P, collection: &Collection) -> io::Result<()> {
    write_newick(File::create(path)?, collection)
}
