use std::collections::BTreeMap;

use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::model::Sighting;

// ---------------------------------------------------------------------------
// Aggregate tables
// ---------------------------------------------------------------------------

/// Bucket label for sightings without a shape. Parenthesized because
/// "unknown" is a real value in the shape vocabulary and must not collide.
pub const MISSING_SHAPE_LABEL: &str = "(missing)";

/// Default upper bound for the map marker sample.
pub const DEFAULT_SAMPLE_SIZE: usize = 100;

/// One sampled map marker: position plus the report text shown on hover.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

/// One geo point for the heatmap and the 3D scatter. Rows exist exactly for
/// the records that have both coordinates.
#[derive(Debug, Clone)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub year: i32,
    pub shape: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregators – pure functions from a view to a table
// ---------------------------------------------------------------------------

/// Count sightings per shape, in first-seen order. Records without a shape
/// land in the [`MISSING_SHAPE_LABEL`] bucket, so the counts always sum to
/// the view length.
pub fn shape_counts(view: &[&Sighting]) -> IndexMap<String, u64> {
    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for s in view {
        let label = s.shape.as_deref().unwrap_or(MISSING_SHAPE_LABEL);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Count sightings per year. BTreeMap iteration gives the ascending year
/// order the line chart needs.
pub fn yearly_trend(view: &[&Sighting]) -> BTreeMap<i32, u64> {
    let mut counts: BTreeMap<i32, u64> = BTreeMap::new();
    for s in view {
        *counts.entry(s.year).or_insert(0) += 1;
    }
    counts
}

/// Arithmetic mean of the encounter duration (minutes) per shape, keys
/// sorted. Records without a shape are excluded from the grouping.
///
/// Only computed for a country-specific view; the global analysis path never
/// calls this.
pub fn shape_duration_means(view: &[&Sighting]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    for s in view {
        let Some(shape) = s.shape.as_deref() else {
            continue;
        };
        let entry = sums.entry(shape.to_string()).or_insert((0.0, 0));
        entry.0 += s.duration_min;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(shape, (total, n))| (shape, total / n as f64))
        .collect()
}

/// Draw `min(max_size, view.len())` sightings without replacement, then keep
/// the sampled records that have both coordinates.
///
/// The null check runs after the draw, so the result can hold fewer than
/// `max_size` markers even when the view has that many valid geo records.
pub fn geo_sample(view: &[&Sighting], max_size: usize, rng: &mut impl Rng) -> Vec<GeoMarker> {
    let amount = max_size.min(view.len());
    view.choose_multiple(rng, amount)
        .filter_map(|s| match (s.latitude, s.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoMarker {
                latitude,
                longitude,
                description: s.description.clone().unwrap_or_default(),
            }),
            _ => None,
        })
        .collect()
}

/// Collect every record with both coordinates. No sampling, no size bound;
/// feeds the density heatmap and the 3D scatter.
pub fn geo_points(view: &[&Sighting]) -> Vec<GeoPoint> {
    view.iter()
        .filter_map(|s| match (s.latitude, s.longitude) {
            (Some(latitude), Some(longitude)) => Some(GeoPoint {
                latitude,
                longitude,
                year: s.year,
                shape: s.shape.clone(),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sighting;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn shape_counts_keep_first_seen_order_and_cover_the_view() {
        let rows = vec![
            sighting(None, Some("light"), 2000, None, None, 1.0),
            sighting(None, Some("disk"), 2001, None, None, 1.0),
            sighting(None, Some("light"), 2002, None, None, 1.0),
            sighting(None, None, 2003, None, None, 1.0),
            sighting(None, Some("disk"), 2004, None, None, 1.0),
            sighting(None, Some("light"), 2005, None, None, 1.0),
        ];
        let view: Vec<&Sighting> = rows.iter().collect();

        let counts = shape_counts(&view);
        let entries: Vec<(&str, u64)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(
            entries,
            vec![("light", 3), ("disk", 2), (MISSING_SHAPE_LABEL, 1)]
        );
        assert_eq!(counts.values().sum::<u64>(), view.len() as u64);
    }

    #[test]
    fn yearly_trend_is_ascending() {
        let rows = vec![
            sighting(None, None, 2001, None, None, 1.0),
            sighting(None, None, 1965, None, None, 1.0),
            sighting(None, None, 2001, None, None, 1.0),
            sighting(None, None, 1999, None, None, 1.0),
        ];
        let view: Vec<&Sighting> = rows.iter().collect();

        let trend = yearly_trend(&view);
        let years: Vec<i32> = trend.keys().copied().collect();
        assert_eq!(years, vec![1965, 1999, 2001]);
        assert!(years.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(trend[&2001], 2);
    }

    #[test]
    fn duration_means_average_per_shape() {
        let rows = vec![
            sighting(None, Some("disk"), 2000, None, None, 2.0),
            sighting(None, Some("disk"), 2000, None, None, 4.0),
            sighting(None, Some("light"), 2000, None, None, 10.0),
            // No shape → excluded from the grouping entirely.
            sighting(None, None, 2000, None, None, 999.0),
        ];
        let view: Vec<&Sighting> = rows.iter().collect();

        let means = shape_duration_means(&view);
        assert_eq!(means.len(), 2);
        assert_eq!(means["disk"], 3.0);
        assert_eq!(means["light"], 10.0);
    }

    #[test]
    fn empty_view_yields_empty_tables() {
        let view: Vec<&Sighting> = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(shape_counts(&view).is_empty());
        assert!(yearly_trend(&view).is_empty());
        assert!(shape_duration_means(&view).is_empty());
        assert!(geo_sample(&view, DEFAULT_SAMPLE_SIZE, &mut rng).is_empty());
        assert!(geo_points(&view).is_empty());
    }

    #[test]
    fn geo_sample_respects_the_bound_and_the_seed() {
        let rows: Vec<Sighting> = (0..50)
            .map(|i| {
                sighting(
                    None,
                    Some("disk"),
                    1990,
                    Some(10.0 + i as f64),
                    Some(20.0),
                    1.0,
                )
            })
            .collect();
        let view: Vec<&Sighting> = rows.iter().collect();

        let mut rng = StdRng::seed_from_u64(11);
        let first = geo_sample(&view, 10, &mut rng);
        // Every record has coordinates, so nothing is lost after the draw.
        assert_eq!(first.len(), 10);

        let mut rng = StdRng::seed_from_u64(11);
        let second = geo_sample(&view, 10, &mut rng);
        assert_eq!(first, second);

        let mut rng = StdRng::seed_from_u64(11);
        let everything = geo_sample(&view, 1000, &mut rng);
        assert_eq!(everything.len(), view.len());
    }

    #[test]
    fn geo_sample_filters_nulls_after_drawing() {
        // Half the view has no coordinates. The draw happens over the raw
        // view, so with 30 slots and 100 valid records the sample still loses
        // the slots that landed on null rows.
        let rows: Vec<Sighting> = (0..200)
            .map(|i| {
                let coords = if i % 2 == 0 {
                    (Some(40.0), Some(-100.0 + i as f64 * 0.1))
                } else {
                    (None, None)
                };
                sighting(Some("USA"), Some("light"), 1990, coords.0, coords.1, 1.0)
            })
            .collect();
        let view: Vec<&Sighting> = rows.iter().collect();
        assert_eq!(geo_points(&view).len(), 100);

        let mut rng = StdRng::seed_from_u64(42);
        let markers = geo_sample(&view, 30, &mut rng);
        assert!(markers.len() < 30);
        assert!(!markers.is_empty());
    }

    #[test]
    fn geo_points_keep_exactly_the_coordinate_complete_records() {
        let rows = vec![
            sighting(None, Some("disk"), 1990, Some(40.0), Some(-75.0), 1.0),
            sighting(None, Some("oval"), 1991, Some(41.0), None, 1.0),
            sighting(None, Some("oval"), 1992, None, Some(-76.0), 1.0),
            sighting(None, None, 1993, None, None, 1.0),
            sighting(None, None, 1994, Some(42.0), Some(-77.0), 1.0),
        ];
        let view: Vec<&Sighting> = rows.iter().collect();

        let points = geo_points(&view);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].year, 1990);
        assert_eq!(points[0].shape.as_deref(), Some("disk"));
        assert_eq!(points[1].year, 1994);
        assert_eq!(points[1].shape, None);
    }
}
