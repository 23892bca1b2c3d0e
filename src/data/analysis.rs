use std::collections::BTreeMap;

use indexmap::IndexMap;
use rand::Rng;

use super::aggregate::{self, GeoMarker, GeoPoint, DEFAULT_SAMPLE_SIZE};
use super::filter;
use super::model::{Dataset, Sighting};

// ---------------------------------------------------------------------------
// Analysis – one pass from a view to the tables the sinks render
// ---------------------------------------------------------------------------

/// Title of the unfiltered analysis.
pub const GLOBAL_TITLE: &str = "Global";

/// Which aggregates an analysis pass computes.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
    /// Duration means are a country-only aggregate; the global pass keeps
    /// this off.
    pub include_duration_means: bool,
    /// Upper bound for the map marker sample.
    pub sample_size: usize,
}

impl AnalysisOptions {
    pub fn global() -> Self {
        AnalysisOptions {
            include_duration_means: false,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }

    pub fn country() -> Self {
        AnalysisOptions {
            include_duration_means: true,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// The owned result of one analysis pass. The dataset is only borrowed while
/// this is computed; the sinks render the owned tables frame after frame.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Chart title fragment: [`GLOBAL_TITLE`] or the country exactly as typed.
    pub title: String,
    /// Number of sightings in the analyzed view.
    pub record_count: usize,
    pub shape_counts: IndexMap<String, u64>,
    pub yearly_trend: BTreeMap<i32, u64>,
    /// Present only for country-specific passes.
    pub duration_means: Option<BTreeMap<String, f64>>,
    pub geo_sample: Vec<GeoMarker>,
    pub geo_points: Vec<GeoPoint>,
}

/// Run one analysis pass over a view.
pub fn run_analysis(
    view: &[&Sighting],
    title: &str,
    options: AnalysisOptions,
    rng: &mut impl Rng,
) -> Analysis {
    Analysis {
        title: title.to_string(),
        record_count: view.len(),
        shape_counts: aggregate::shape_counts(view),
        yearly_trend: aggregate::yearly_trend(view),
        duration_means: options
            .include_duration_means
            .then(|| aggregate::shape_duration_means(view)),
        geo_sample: aggregate::geo_sample(view, options.sample_size, rng),
        geo_points: aggregate::geo_points(view),
    }
}

/// Analyze the full dataset. Never computes duration means.
pub fn run_global_analysis(dataset: &Dataset, rng: &mut impl Rng) -> Analysis {
    run_analysis(&dataset.all(), GLOBAL_TITLE, AnalysisOptions::global(), rng)
}

/// Analyze the sightings matching `country`; the title is the query exactly
/// as typed. A blank query falls back to the global pass, so duration means
/// can never be produced for an unfiltered view.
pub fn run_country_analysis(dataset: &Dataset, country: &str, rng: &mut impl Rng) -> Analysis {
    if filter::is_blank(country) {
        return run_global_analysis(dataset, rng);
    }
    let view = filter::by_country(dataset, country);
    run_analysis(&view, country, AnalysisOptions::country(), rng)
}
