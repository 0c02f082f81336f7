//! Duplicate removal across rule results.
//!
//! Rules overlap on purpose (an OAB rule and a party-name rule often return
//! the same communication), so the combined result is deduplicated once,
//! after every rule has run.

use std::collections::HashSet;

use djen_client::Publication;

/// Identity of a publication for duplicate detection: the upstream content
/// hash when it is present and non-empty, otherwise the id and masked
/// process number joined with an underscore. Absent parts contribute an
/// empty string, so even partial records get a stable key.
pub fn dedup_key(publication: &Publication) -> String {
    match publication.hash.as_deref() {
        Some(hash) if !hash.is_empty() => hash.to_string(),
        _ => format!(
            "{}_{}",
            publication
                .id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            publication
                .masked_process_number
                .as_deref()
                .unwrap_or_default(),
        ),
    }
}

/// Drop publications whose key was already seen, keeping first occurrences
/// in their original order. Returns the survivors and the removed count.
pub fn remove_duplicates(publications: Vec<Publication>) -> (Vec<Publication>, usize) {
    let total = publications.len();
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(total);

    for publication in publications {
        if seen.insert(dedup_key(&publication)) {
            unique.push(publication);
        }
    }

    let removed = total - unique.len();
    (unique, removed)
}
