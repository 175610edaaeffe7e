use std::fmt;

use super::model::{BikeDataset, Record, Season, ValueColumn};

// ---------------------------------------------------------------------------
// User type – which rider counts feed the user-type breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserType {
    #[default]
    All,
    Casual,
    Registered,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::All, UserType::Casual, UserType::Registered];

    /// The value columns aggregated for this user type. Selection only;
    /// the filtered record set does not depend on it.
    pub fn value_columns(self) -> &'static [ValueColumn] {
        match self {
            UserType::All => &[ValueColumn::Casual, ValueColumn::Registered],
            UserType::Casual => &[ValueColumn::Casual],
            UserType::Registered => &[ValueColumn::Registered],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UserType::All => "All",
            UserType::Casual => "Casual",
            UserType::Registered => "Registered",
        }
    }
}

// ---------------------------------------------------------------------------
// Month range – inclusive [min, max]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub min: u8,
    pub max: u8,
}

impl MonthRange {
    pub const FULL: MonthRange = MonthRange { min: 1, max: 12 };

    pub fn new(min: u8, max: u8) -> Self {
        MonthRange { min, max }
    }

    /// Inclusive on both ends. A range with `min > max` contains nothing.
    pub fn contains(&self, month: u8) -> bool {
        self.min <= month && month <= self.max
    }
}

impl Default for MonthRange {
    fn default() -> Self {
        MonthRange::FULL
    }
}

// ---------------------------------------------------------------------------
// Filter criteria – rebuilt from widget state on every interaction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// `None` means "All".
    pub season: Option<Season>,
    pub month_range: MonthRange,
    pub user_type: UserType,
}

impl FilterCriteria {
    /// Whether a record passes the season and month predicates.
    ///
    /// `user_type` takes no part here.
    pub fn matches(&self, record: &Record) -> bool {
        let season_ok = self.season.map_or(true, |s| record.season == s);
        season_ok && self.month_range.contains(record.month)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "season={} months={}..={} users={}",
            self.season.map_or("All", Season::label),
            self.month_range.min,
            self.month_range.max,
            self.user_type.label()
        )
    }
}

/// Return indices of records that pass `criteria`, in dataset order.
///
/// The dataset itself is never touched; an empty result is valid.
pub fn apply(records: &[Record], criteria: &FilterCriteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Convenience wrapper over [`apply`] for a whole dataset.
pub fn filtered_indices(dataset: &BikeDataset, criteria: &FilterCriteria) -> Vec<usize> {
    apply(&dataset.records, criteria)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::data::model::fixtures::{record, sample_dataset};

    #[test]
    fn default_criteria_keep_everything() {
        let ds = sample_dataset();
        let view = filtered_indices(&ds, &FilterCriteria::default());
        assert_eq!(view, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn season_filter_keeps_only_that_season() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            season: Some(Season::Summer),
            ..Default::default()
        };
        let view = filtered_indices(&ds, &criteria);
        assert_eq!(view, vec![3, 4]);
    }

    #[test]
    fn month_range_is_inclusive() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            month_range: MonthRange::new(4, 7),
            ..Default::default()
        };
        let months: Vec<u8> = ds
            .select(&filtered_indices(&ds, &criteria))
            .map(|r| r.month)
            .collect();
        assert_eq!(months, vec![4, 6, 7]);
    }

    #[test]
    fn conflicting_filters_give_an_empty_view() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            season: Some(Season::Winter),
            month_range: MonthRange::new(5, 8),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &criteria).is_empty());

        let inverted = FilterCriteria {
            month_range: MonthRange::new(9, 3),
            ..Default::default()
        };
        assert!(filtered_indices(&ds, &inverted).is_empty());
    }

    #[test]
    fn fall_record_passes_fall_criteria() {
        let records = vec![record(Season::Fall, 10, 8, 5, 20)];
        let criteria = FilterCriteria {
            season: Some(Season::Fall),
            month_range: MonthRange::FULL,
            user_type: UserType::Casual,
        };
        assert_eq!(apply(&records, &criteria), vec![0]);
    }

    #[test]
    fn user_type_selects_columns() {
        assert_eq!(UserType::Casual.value_columns(), &[ValueColumn::Casual]);
        assert_eq!(UserType::Registered.value_columns(), &[ValueColumn::Registered]);
        assert_eq!(
            UserType::All.value_columns(),
            &[ValueColumn::Casual, ValueColumn::Registered]
        );
    }

    #[test]
    fn criteria_display() {
        let criteria = FilterCriteria {
            season: Some(Season::Spring),
            month_range: MonthRange::new(2, 5),
            user_type: UserType::Registered,
        };
        assert_eq!(criteria.to_string(), "season=Spring months=2..=5 users=Registered");
    }

    fn arb_season() -> impl Strategy<Value = Season> {
        prop::sample::select(Season::ALL.to_vec())
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (arb_season(), 1u8..=12, 0u8..24, 0u32..500, 0u32..500)
            .prop_map(|(s, m, h, c, r)| record(s, m, h, c, r))
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::option::of(arb_season()),
            1u8..=12,
            1u8..=12,
            prop::sample::select(UserType::ALL.to_vec()),
        )
            .prop_map(|(season, a, b, user_type)| FilterCriteria {
                season,
                month_range: MonthRange::new(a.min(b), a.max(b)),
                user_type,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_view_is_a_subset(
            records in prop::collection::vec(arb_record(), 0..60),
            criteria in arb_criteria(),
        ) {
            let view = apply(&records, &criteria);
            prop_assert!(view.len() <= records.len());
            prop_assert!(view.windows(2).all(|w| w[0] < w[1]));
            for &i in &view {
                prop_assert!(criteria.matches(&records[i]));
            }
        }

        #[test]
        fn prop_apply_is_idempotent(
            records in prop::collection::vec(arb_record(), 0..60),
            criteria in arb_criteria(),
        ) {
            let before = records.clone();
            let first = apply(&records, &criteria);
            let second = apply(&records, &criteria);
            prop_assert_eq!(first, second);
            prop_assert_eq!(records, before);
        }

        #[test]
        fn prop_full_range_all_seasons_keeps_everything(
            records in prop::collection::vec(arb_record(), 0..60),
            user_type in prop::sample::select(UserType::ALL.to_vec()),
        ) {
            let criteria = FilterCriteria { user_type, ..Default::default() };
            prop_assert_eq!(apply(&records, &criteria), (0..records.len()).collect::<Vec<_>>());
        }

        #[test]
        fn prop_user_type_never_changes_the_view(
            records in prop::collection::vec(arb_record(), 0..60),
            criteria in arb_criteria(),
        ) {
            let base = apply(&records, &criteria);
            for user_type in UserType::ALL {
                let switched = FilterCriteria { user_type, ..criteria };
                prop_assert_eq!(&apply(&records, &switched), &base);
            }
        }
    }
}
