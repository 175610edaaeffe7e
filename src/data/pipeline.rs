use super::aggregate::{aggregate, AggregateResult, GroupBy, StatFn};
use super::filter::{filtered_indices, FilterCriteria};
use super::model::{BikeDataset, ValueColumn};

/// Statistics shown for the user-type breakdown (no count column there).
const USER_TYPE_STATS: [StatFn; 4] = [StatFn::Mean, StatFn::Median, StatFn::Max, StatFn::Min];

// ---------------------------------------------------------------------------
// DashboardSummary – every aggregate the central panel renders
// ---------------------------------------------------------------------------

/// The result of one full filter-and-aggregate pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Indices of records that passed the filters.
    pub visible_indices: Vec<usize>,
    /// Mean `cnt` per (day type, hour).
    pub hourly_trend: AggregateResult,
    /// `cnt` statistics per season, all four seasons present.
    pub by_season: AggregateResult,
    /// `cnt` statistics per month present in the view.
    pub by_month: AggregateResult,
    /// Rider statistics over the whole view for the selected user type.
    pub by_user_type: AggregateResult,
}

impl DashboardSummary {
    /// Run the whole pipeline from scratch for `criteria`.
    pub fn compute(dataset: &BikeDataset, criteria: &FilterCriteria) -> Self {
        let visible_indices = filtered_indices(dataset, criteria);
        let view = || dataset.select(&visible_indices);

        let hourly_trend = aggregate(view(), GroupBy::DayTypeHour, &[ValueColumn::Cnt], &[StatFn::Mean]);
        let by_season = aggregate(view(), GroupBy::Season, &[ValueColumn::Cnt], &StatFn::ALL);
        let by_month = aggregate(view(), GroupBy::Month, &[ValueColumn::Cnt], &StatFn::ALL);
        let by_user_type = aggregate(
            view(),
            GroupBy::Overall,
            criteria.user_type.value_columns(),
            &USER_TYPE_STATS,
        );

        DashboardSummary {
            visible_indices,
            hourly_trend,
            by_season,
            by_month,
            by_user_type,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_indices.len()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::aggregate::GroupKey;
    use crate::data::filter::{MonthRange, UserType};
    use crate::data::model::fixtures::{record, sample_dataset};
    use crate::data::model::{DayType, Season};

    #[test]
    fn full_criteria_summarise_every_record() {
        let ds = sample_dataset();
        let summary = DashboardSummary::compute(&ds, &FilterCriteria::default());

        assert_eq!(summary.visible_count(), ds.len());
        let total: usize = summary
            .by_season
            .rows
            .iter()
            .map(|r| r.stats[0].count)
            .sum();
        assert_eq!(total, ds.len());
        assert_eq!(summary.by_user_type.columns, vec![ValueColumn::Casual, ValueColumn::Registered]);
        assert_eq!(summary.by_user_type.stat_fns.len(), 4);
    }

    #[test]
    fn fall_casual_example() {
        let ds = BikeDataset::from_records(vec![record(Season::Fall, 10, 8, 5, 20)]);
        let criteria = FilterCriteria {
            season: Some(Season::Fall),
            month_range: MonthRange::FULL,
            user_type: UserType::Casual,
        };
        let summary = DashboardSummary::compute(&ds, &criteria);

        assert_eq!(summary.visible_indices, vec![0]);
        let casual = summary
            .by_user_type
            .get(GroupKey::Overall, ValueColumn::Casual)
            .unwrap();
        assert_eq!((casual.mean, casual.median, casual.max, casual.min, casual.count), (5.0, 5.0, 5.0, 5.0, 1));
        assert!(summary
            .by_user_type
            .get(GroupKey::Overall, ValueColumn::Registered)
            .is_none());
    }

    #[test]
    fn empty_view_produces_nan_summary() {
        let ds = sample_dataset();
        let criteria = FilterCriteria {
            season: Some(Season::Winter),
            month_range: MonthRange::new(5, 8),
            ..Default::default()
        };
        let summary = DashboardSummary::compute(&ds, &criteria);

        assert_eq!(summary.visible_count(), 0);
        assert!(summary.hourly_trend.rows.is_empty());
        assert!(summary.by_month.rows.is_empty());
        assert_eq!(summary.by_season.rows.len(), 4);
        assert!(summary.by_season.is_empty());
        let overall = &summary.by_user_type.rows[0].stats;
        assert!(overall.iter().all(|s| s.count == 0 && s.mean.is_nan()));
    }

    #[test]
    fn switching_user_type_only_changes_user_breakdown() {
        let ds = sample_dataset();
        // every season keeps at least one record, so no NaN rows
        let base = FilterCriteria {
            month_range: MonthRange::new(1, 10),
            ..Default::default()
        };
        let all = DashboardSummary::compute(&ds, &base);
        for user_type in [UserType::Casual, UserType::Registered] {
            let switched = DashboardSummary::compute(&ds, &FilterCriteria { user_type, ..base });
            assert_eq!(switched.visible_indices, all.visible_indices);
            assert_eq!(switched.hourly_trend, all.hourly_trend);
            assert_eq!(switched.by_season, all.by_season);
            assert_eq!(switched.by_month, all.by_month);
            assert_eq!(switched.by_user_type.columns, user_type.value_columns());
        }
    }

    #[test]
    fn hourly_trend_is_mean_of_cnt() {
        let ds = sample_dataset();
        let summary = DashboardSummary::compute(&ds, &FilterCriteria::default());
        let evening = summary
            .hourly_trend
            .get(GroupKey::DayHour(DayType::WorkingDay, 17), ValueColumn::Cnt)
            .unwrap();
        // 280 and 77
        assert_relative_eq!(evening.mean, 178.5);
        assert_eq!(summary.hourly_trend.stat_fns, vec![StatFn::Mean]);
    }

    #[test]
    fn recompute_leaves_dataset_untouched() {
        let ds = sample_dataset();
        let before = ds.records.clone();
        let criteria = FilterCriteria {
            season: Some(Season::Spring),
            ..Default::default()
        };
        let first = DashboardSummary::compute(&ds, &criteria);
        let second = DashboardSummary::compute(&ds, &criteria);
        assert_eq!(ds.records, before);
        assert_eq!(first.visible_indices, second.visible_indices);
    }
}
