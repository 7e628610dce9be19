//! Label escaping for writing and reading Newick and Nexus labels.

/// Characters that force a label to be quoted when written.
const SPECIAL_CHARACTERS: &[char] = &[',', ';', ':', '(', ')', '[', ']', '\'', '_', '\t', '\n', '\r'];

/// Escapes a label for use as a Newick or Nexus label.
///
/// Labels containing special characters (punctuation, delimiters,
/// underscores) are wrapped in single quotes, with internal single quotes
/// doubled. Otherwise spaces are replaced with underscores.
///
/// # Examples
/// ```
/// use timetree::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Australasian swamphen"), "Australasian_swamphen");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Baillon's crake"), "'Baillon''s crake'");
/// assert_eq!(escape_label("Snake_case"), "'Snake_case'");
/// ```
pub fn escape_label(label: &str) -> String {
    if label.contains(SPECIAL_CHARACTERS) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}

/// Unescapes an unquoted label by replacing underscores with spaces.
///
/// # Examples
/// ```
/// use timetree::parser::utils::unescape_label;
/// assert_eq!(unescape_label("Passer_domesticus"), "Passer domesticus");
/// assert_eq!(unescape_label("Pukeko"), "Pukeko");
/// ```
pub fn unescape_label(label: &str) -> String {
    label.replace('_', " ")
}
