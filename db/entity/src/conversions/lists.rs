//! Comma-joined list columns
//!
//! Role abilities and permission subjects are stored as a single comma-joined
//! string column. These helpers normalise the list on the way in and split it
//! on the way out.

/// Join list items into the stored comma-joined form
///
/// Items are trimmed, blank items are dropped and duplicates are removed while
/// preserving first-seen order.
pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        let trimmed = item.as_ref().trim();
        if !trimmed.is_empty() && !seen.iter().any(|s| s == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen.join(",")
}

/// Split a stored comma-joined column back into its items
///
/// Blank segments are skipped, so an empty column yields an empty list.
pub fn split_list(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
