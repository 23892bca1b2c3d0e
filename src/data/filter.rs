use super::model::{Dataset, Sighting};

// ---------------------------------------------------------------------------
// Country filter
// ---------------------------------------------------------------------------

/// Whether a query is the "no filter" sentinel (empty or whitespace-only).
pub fn is_blank(query: &str) -> bool {
    query.trim().is_empty()
}

/// Return the view of sightings matching a country query.
///
/// A sighting passes when:
/// * The query is blank → every record passes (the global-analysis path)
/// * Its country contains the query as a case-insensitive substring
/// * Records without a country never match a non-blank query
///
/// An empty result is valid output, not an error.
pub fn by_country<'a>(dataset: &'a Dataset, query: &str) -> Vec<&'a Sighting> {
    if is_blank(query) {
        return dataset.all();
    }

    let needle = query.to_lowercase();
    dataset
        .sightings
        .iter()
        .filter(|s| {
            s.country
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect()
}
