//! Order-preserving duplicate removal.

use std::collections::HashSet;

/// Returns `items` with repeats removed, keeping each value at the position
/// of its first occurrence. Equality is exact string equality.
///
/// # Examples
///
/// ```
/// use pdf_harvest::parser::dedup_preserving_order;
///
/// let urls = vec!["a.pdf".to_string(), "b.pdf".to_string(), "a.pdf".to_string()];
/// assert_eq!(dedup_preserving_order(urls), vec!["a.pdf", "b.pdf"]);
/// ```
#[must_use]
pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
