//! Canonical form of taxon and tree names.

/// Returns the canonical form of a taxon or tree name.
///
/// Runs of whitespace collapse into a single space, leading and trailing
/// whitespace is dropped, and all characters are lower-cased except the
/// first one, which is upper-cased. Names with the same canonical form
/// denote the same taxon.
///
/// # Examples
/// ```
/// use timetree::model::canonical_name;
/// assert_eq!(canonical_name("  homo \t SAPIENS\n"), "Homo sapiens");
/// assert_eq!(canonical_name("untitled.1"), "Untitled.1");
/// assert_eq!(canonical_name("   "), "");
/// ```
pub fn canonical_name(name: &str) -> String {
    let mut lower = String::with_capacity(name.len());
    for word in name.split_whitespace() {
        if !lower.is_empty() {
            lower.push(' ');
        }
        lower.extend(word.chars().flat_map(char::to_lowercase));
    }

    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lower,
    }
}
