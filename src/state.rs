use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::filter::{FilterCriteria, UserType};
use crate::data::loader::load_file;
use crate::data::model::{BikeDataset, DayType, Season, ValueColumn};
use crate::data::pipeline::DashboardSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file has been loaded).
    pub dataset: Option<BikeDataset>,

    /// File the dataset came from, shown in the footer.
    pub source_path: Option<PathBuf>,

    /// Current widget selections.
    pub criteria: FilterCriteria,

    /// Output of the last full pipeline run.
    pub summary: Option<DashboardSummary>,

    /// Series colours shared by every chart.
    pub colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let labels = DayType::ALL
            .iter()
            .map(|d| d.label())
            .chain(Season::ALL.iter().map(|s| s.label()))
            .chain(
                [ValueColumn::Cnt, ValueColumn::Casual, ValueColumn::Registered]
                    .iter()
                    .map(|c| c.label()),
            );
        Self {
            dataset: None,
            source_path: None,
            criteria: FilterCriteria::default(),
            summary: None,
            colors: ColorMap::new(labels),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and reset the filters.
    pub fn set_dataset(&mut self, dataset: BikeDataset, source: Option<PathBuf>) {
        self.criteria = FilterCriteria::default();
        self.dataset = Some(dataset);
        self.source_path = source;
        self.status_message = None;
        self.refilter();
    }

    /// Re-run the whole filter-and-aggregate pipeline.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let summary = DashboardSummary::compute(ds, &self.criteria);
        log::debug!(
            "recomputed summary for {}: {} of {} records visible",
            self.criteria,
            summary.visible_count(),
            ds.len()
        );
        if summary.visible_count() == 0 && !ds.is_empty() {
            log::warn!("no records match {}", self.criteria);
        }
        self.summary = Some(summary);
    }

    pub fn set_season(&mut self, season: Option<Season>) {
        if self.criteria.season != season {
            self.criteria.season = season;
            self.refilter();
        }
    }

    /// Move the lower month bound, dragging the upper one along if needed.
    pub fn set_month_min(&mut self, month: u8) {
        let month = month.clamp(1, 12);
        let range = &mut self.criteria.month_range;
        if range.min == month {
            return;
        }
        range.min = month;
        range.max = range.max.max(month);
        self.refilter();
    }

    /// Move the upper month bound, dragging the lower one along if needed.
    pub fn set_month_max(&mut self, month: u8) {
        let month = month.clamp(1, 12);
        let range = &mut self.criteria.month_range;
        if range.max == month {
            return;
        }
        range.max = month;
        range.min = range.min.min(month);
        self.refilter();
    }

    /// Apply both slider values from one frame. Only the bound that
    /// actually moved is applied, so a drag past the other bound is not
    /// undone by the other slider's value from before the drag.
    pub fn set_month_range(&mut self, min: u8, max: u8) {
        let current = self.criteria.month_range;
        if min != current.min {
            self.set_month_min(min);
        } else if max != current.max {
            self.set_month_max(max);
        }
    }

    pub fn set_user_type(&mut self, user_type: UserType) {
        if self.criteria.user_type != user_type {
            self.criteria.user_type = user_type;
            self.refilter();
        }
    }

    /// Load `path`, replacing the current dataset on success. On failure the
    /// previous dataset stays and the error goes to the status line.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} records from {}", dataset.len(), path.display());
                self.set_dataset(dataset, Some(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::MonthRange;
    use crate::data::model::fixtures::sample_dataset;

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset(), None);
        state
    }

    #[test]
    fn loading_computes_an_unfiltered_summary() {
        let state = loaded_state();
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.visible_count(), 8);
        assert_eq!(state.criteria, FilterCriteria::default());
    }

    #[test]
    fn each_interaction_recomputes() {
        let mut state = loaded_state();
        state.set_season(Some(Season::Fall));
        assert_eq!(state.summary.as_ref().unwrap().visible_indices, vec![5, 6]);

        state.set_month_max(9);
        assert_eq!(state.summary.as_ref().unwrap().visible_indices, vec![6]);

        state.set_season(None);
        state.set_month_min(12);
        assert_eq!(state.criteria.month_range, MonthRange::new(12, 12));
        assert_eq!(state.summary.as_ref().unwrap().visible_indices, vec![7]);
    }

    #[test]
    fn month_bounds_stay_ordered() {
        let mut state = loaded_state();
        state.set_month_max(4);
        state.set_month_min(7);
        assert_eq!(state.criteria.month_range, MonthRange::new(7, 7));
        state.set_month_max(2);
        assert_eq!(state.criteria.month_range, MonthRange::new(2, 2));
        state.set_month_min(0);
        assert_eq!(state.criteria.month_range, MonthRange::new(1, 2));
    }

    #[test]
    fn slider_frame_drags_other_bound_along() {
        let mut state = loaded_state();
        state.set_month_range(3, 5);
        state.set_month_range(3, 5);
        assert_eq!(state.criteria.month_range, MonthRange::new(3, 5));

        // "From" dragged to 8 while "To" still reads 5 from the same frame
        state.set_month_range(8, 5);
        assert_eq!(state.criteria.month_range, MonthRange::new(8, 8));

        // "To" dragged below "From"
        state.set_month_range(8, 2);
        assert_eq!(state.criteria.month_range, MonthRange::new(2, 2));

        state.set_month_range(2, 11);
        assert_eq!(state.criteria.month_range, MonthRange::new(2, 11));
        assert_eq!(state.summary.as_ref().unwrap().visible_count(), 6);
    }

    #[test]
    fn user_type_keeps_visible_set() {
        let mut state = loaded_state();
        state.set_month_min(3);
        let before = state.summary.as_ref().unwrap().visible_indices.clone();
        state.set_user_type(UserType::Registered);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.visible_indices, before);
        assert_eq!(summary.by_user_type.columns, vec![ValueColumn::Registered]);
    }

    #[test]
    fn failed_open_keeps_previous_dataset() {
        let mut state = loaded_state();
        let dir = tempfile::tempdir().unwrap();
        state.open_path(&dir.path().join("missing.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
        assert_eq!(state.dataset.as_ref().unwrap().len(), 8);
    }

    #[test]
    fn open_replaces_dataset_and_resets_filters() {
        let mut state = loaded_state();
        state.set_season(Some(Season::Winter));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hour.csv");
        std::fs::write(
            &path,
            "season,workingday,weathersit,temp,month,casual,registered,cnt,hr\n\
             2,1,1,0.5,6,10,30,40,9\n",
        )
        .unwrap();
        state.open_path(&path);

        assert!(state.status_message.is_none());
        assert_eq!(state.criteria.season, None);
        assert_eq!(state.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(state.summary.as_ref().unwrap().visible_count(), 1);
    }
}
