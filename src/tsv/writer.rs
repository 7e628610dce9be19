//! Writing collections as tab-separated tables.

use super::{COLUMNS, COMMENT, NO_PARENT};
use crate::model::Collection;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes all trees of the collection as one table.
///
/// Trees follow in name order, and the nodes of each tree in pre-order, so
/// the table can be [read](super::read) back.
pub fn write<W: Write>(writer: W, collection: &Collection) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{COMMENT} time calibrated phylogenetic trees")?;
    writeln!(writer, "{}", COLUMNS.join("\t"))?;
    for row in collection.to_rows() {
        let parent = row.parent.map_or_else(|| NO_PARENT.to_string(), |p| p.to_string());
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            row.tree, row.node, parent, row.age, row.taxon
        )?;
    }
    writer.flush()
}

/// Writes all trees of the collection to a new table file at `path`.
pub fn write_file<P: AsRef<Path>>(path: P, collection: &Collection) -> io::Result<()> {
    write(File::create(path)?, collection)
}
