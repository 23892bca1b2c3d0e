use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Sighting – one row of the dataset
// ---------------------------------------------------------------------------

/// A single reported sighting (one row of the source CSV).
///
/// String fields are trimmed at load time; empty cells become `None`.
#[derive(Debug, Clone)]
pub struct Sighting {
    /// Country where the sighting was reported.
    pub country: Option<String>,
    /// Reported object shape ("disk", "light", ...). Free text, not a fixed set.
    pub shape: Option<String>,
    /// Year of the sighting.
    pub year: i32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Encounter duration in minutes, converted from seconds by the loader.
    pub duration_min: f64,
    /// Free-text report description.
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded record set
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed lookup indices.
///
/// Created once at startup and never mutated; filtering produces borrowed
/// views (`Vec<&Sighting>`) instead of touching the records.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All sightings (rows), in file order.
    pub sightings: Vec<Sighting>,
    /// Sorted distinct shape labels present in the data.
    pub shapes: BTreeSet<String>,
    /// Number of sightings per country, sorted by country name.
    pub country_counts: BTreeMap<String, u64>,
}

impl Dataset {
    /// Build the lookup indices from the loaded rows.
    pub fn from_sightings(sightings: Vec<Sighting>) -> Self {
        let mut shapes: BTreeSet<String> = BTreeSet::new();
        let mut country_counts: BTreeMap<String, u64> = BTreeMap::new();

        for s in &sightings {
            if let Some(shape) = &s.shape {
                shapes.insert(shape.clone());
            }
            if let Some(country) = &s.country {
                *country_counts.entry(country.clone()).or_insert(0) += 1;
            }
        }

        Dataset {
            sightings,
            shapes,
            country_counts,
        }
    }

    /// Number of sightings.
    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }

    /// Borrow every record, i.e. the view for the global analysis path.
    pub fn all(&self) -> Vec<&Sighting> {
        self.sightings.iter().collect()
    }
}
