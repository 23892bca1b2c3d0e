use crate::color::ShapeColors;
use crate::data::analysis::{self, Analysis};
use crate::data::filter;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is read-only for the whole process lifetime; editing the
/// country query only swaps the cached analysis built from it.
pub struct AppState {
    /// Loaded dataset, immutable after startup.
    pub dataset: Dataset,

    /// Country search field contents; blank means global analysis.
    pub country_query: String,

    /// Analysis for the current query (cached, recomputed eagerly on edits).
    pub analysis: Analysis,

    /// Colour per shape label, shared by every chart.
    pub shape_colors: ShapeColors,

    /// Yaw angle in degrees for the 3D scatter projection.
    pub scatter_yaw_deg: f32,

    /// Non-fatal status line shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    /// Wrap a freshly loaded dataset and run the global analysis once.
    pub fn new(dataset: Dataset) -> Self {
        let shape_colors = ShapeColors::new(&dataset.shapes);
        let analysis = analysis::run_global_analysis(&dataset, &mut rand::rng());

        AppState {
            dataset,
            country_query: String::new(),
            analysis,
            shape_colors,
            scatter_yaw_deg: 35.0,
            status_message: None,
        }
    }

    /// Re-run the analysis for the current query. Called whenever the search
    /// field changes; a blank query takes the global path.
    pub fn recompute_analysis(&mut self) {
        let mut rng = rand::rng();
        let analysis = if filter::is_blank(&self.country_query) {
            analysis::run_global_analysis(&self.dataset, &mut rng)
        } else {
            analysis::run_country_analysis(&self.dataset, &self.country_query, &mut rng)
        };
        log::debug!(
            "query {:?}: {} of {} sightings",
            self.country_query,
            analysis.record_count,
            self.dataset.len()
        );

        self.status_message = if analysis.record_count == 0 && !filter::is_blank(&self.country_query)
        {
            Some(format!("No sightings matched \"{}\"", self.country_query))
        } else {
            None
        };
        self.analysis = analysis;
    }

    /// Put a country name into the search field (side-panel shortcut).
    pub fn select_country(&mut self, country: &str) {
        self.country_query = country.to_string();
        self.recompute_analysis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sighting;

    fn state() -> AppState {
        AppState::new(Dataset::from_sightings(vec![
            sighting(Some("USA"), Some("disk"), 1967, Some(33.9), Some(-118.2), 2.0),
            sighting(Some("Canada"), Some("light"), 1990, Some(45.4), Some(-75.7), 1.0),
        ]))
    }

    #[test]
    fn starts_with_the_global_analysis() {
        let state = state();
        assert_eq!(state.analysis.title, "Global");
        assert_eq!(state.analysis.record_count, 2);
        assert!(state.analysis.duration_means.is_none());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn selecting_a_country_switches_to_the_filtered_analysis() {
        let mut state = state();
        state.select_country("usa");

        assert_eq!(state.analysis.title, "usa");
        assert_eq!(state.analysis.record_count, 1);
        assert!(state.analysis.duration_means.is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn unmatched_query_sets_a_status_message_and_clears_it_again() {
        let mut state = state();

        state.country_query = "atlantis".to_string();
        state.recompute_analysis();
        assert_eq!(state.analysis.record_count, 0);
        assert!(state.status_message.is_some());

        state.country_query.clear();
        state.recompute_analysis();
        assert_eq!(state.analysis.record_count, 2);
        assert!(state.status_message.is_none());
    }
}
