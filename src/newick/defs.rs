//! Newick format constants.

/// Bytes ending an unquoted label or branch length: parentheses, comma,
/// colon, semicolon, whitespace and comment brackets
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Smallest branch length in years; explicit branch lengths are clamped up to it
pub(crate) const MIN_BRANCH_LENGTH: u64 = 1;
