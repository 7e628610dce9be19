//! Nexus format constants and definitions.

/// Nexus file header "#NEXUS"
pub(crate) const NEXUS_HEADER: &[u8] = b"#NEXUS";

/// Bytes ending an unquoted token: whitespace, punctuation and comment start
pub(crate) const NEXUS_TOKEN_DELIMITERS: &[u8] = b" \t\n\r;,/=[";

/// Punctuation reported as the delimiter of a token
pub(crate) const NEXUS_PUNCTUATION: &[u8] = b";,/=";

/// Block begin keyword
pub(crate) const BEGIN: &str = "begin";

/// Block end keywords
pub(crate) const END: &str = "end";
pub(crate) const ENDBLOCK: &str = "endblock";

// Trees block keywords
pub(crate) const TRANSLATE: &str = "translate";
pub(crate) const TREE: &str = "tree";

/// Marker of the default tree before its name, as in `TREE * name = ...`
pub(crate) const DEFAULT_TREE_MARKER: &str = "*";

/// Block kinds as far as tree reading is concerned.
///
/// Only TREES blocks carry anything we read; every other block (TAXA,
/// CHARACTERS, program specific ones like MRBAYES) is skipped up to its
/// END and keeps its name for logging.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NexusBlock {
    Trees,
    Skipped(String),
}

impl NexusBlock {
    /// Classify a block name, case-insensitive
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("trees") {
            NexusBlock::Trees
        } else {
            NexusBlock::Skipped(name.to_string())
        }
    }
}
