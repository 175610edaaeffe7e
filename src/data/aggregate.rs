use std::collections::BTreeMap;
use std::fmt;

use super::model::{DayType, Record, Season, ValueColumn};

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// One summary statistic, used to pick which columns a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatFn {
    Mean,
    Median,
    Max,
    Min,
    Count,
}

impl StatFn {
    pub const ALL: [StatFn; 5] = [
        StatFn::Mean,
        StatFn::Median,
        StatFn::Max,
        StatFn::Min,
        StatFn::Count,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatFn::Mean => "mean",
            StatFn::Median => "median",
            StatFn::Max => "max",
            StatFn::Min => "min",
            StatFn::Count => "count",
        }
    }
}

/// Summary of one numeric column over one group.
///
/// An empty group yields `count == 0` and NaN for everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
    pub count: usize,
}

impl Stats {
    pub const EMPTY: Stats = Stats {
        mean: f64::NAN,
        median: f64::NAN,
        max: f64::NAN,
        min: f64::NAN,
        count: 0,
    };

    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Stats::EMPTY;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Stats {
            mean,
            median,
            max: sorted[count - 1],
            min: sorted[0],
            count,
        }
    }

    pub fn get(&self, stat: StatFn) -> f64 {
        match stat {
            StatFn::Mean => self.mean,
            StatFn::Median => self.median,
            StatFn::Max => self.max,
            StatFn::Min => self.min,
            StatFn::Count => self.count as f64,
        }
    }
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// `(workingday_label, hr)`
    DayTypeHour,
    Season,
    Month,
    /// A single group over every record.
    Overall,
}

/// Key of one output group. `Ord` gives the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    DayHour(DayType, u8),
    Season(Season),
    Month(u8),
    Overall,
}

impl GroupBy {
    pub fn key(self, record: &Record) -> GroupKey {
        match self {
            GroupBy::DayTypeHour => GroupKey::DayHour(record.day_type, record.hour),
            GroupBy::Season => GroupKey::Season(record.season),
            GroupBy::Month => GroupKey::Month(record.month),
            GroupBy::Overall => GroupKey::Overall,
        }
    }

    /// Groups that appear even when no record falls into them.
    fn fixed_keys(self) -> Vec<GroupKey> {
        match self {
            GroupBy::Season => Season::ALL.iter().copied().map(GroupKey::Season).collect(),
            GroupBy::Overall => vec![GroupKey::Overall],
            GroupBy::DayTypeHour | GroupBy::Month => Vec::new(),
        }
    }

    /// Header of the key column in tables.
    pub fn label(self) -> &'static str {
        match self {
            GroupBy::DayTypeHour => "day / hour",
            GroupBy::Season => "season",
            GroupBy::Month => "month",
            GroupBy::Overall => "",
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::DayHour(day, hour) => write!(f, "{day} {hour:02}:00"),
            GroupKey::Season(season) => write!(f, "{season}"),
            GroupKey::Month(month) => write!(f, "{month}"),
            GroupKey::Overall => f.write_str("all"),
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: GroupKey,
    /// One entry per [`AggregateResult::columns`], same order.
    pub stats: Vec<Stats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub group_by: GroupBy,
    pub columns: Vec<ValueColumn>,
    pub stat_fns: Vec<StatFn>,
    pub rows: Vec<AggregateRow>,
}

impl AggregateResult {
    pub fn get(&self, key: GroupKey, column: ValueColumn) -> Option<&Stats> {
        let col_idx = self.columns.iter().position(|&c| c == column)?;
        self.rows
            .iter()
            .find(|row| row.key == key)
            .and_then(|row| row.stats.get(col_idx))
    }

    /// `(key, value)` pairs of one statistic over one column, in row order.
    pub fn series(&self, column: ValueColumn, stat: StatFn) -> Vec<(GroupKey, f64)> {
        let Some(col_idx) = self.columns.iter().position(|&c| c == column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.stats.get(col_idx).map(|s| (row.key, s.get(stat))))
            .collect()
    }

    /// True when no group holds any record.
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.stats.iter().all(|s| s.count == 0))
    }
}

/// Group `records` by `group_by` and summarise each of `columns`.
///
/// Rows come out in [`GroupKey`] order: canonical season order, day type
/// then hour, ascending month. Seasons are always all present.
pub fn aggregate<'a, I>(
    records: I,
    group_by: GroupBy,
    columns: &[ValueColumn],
    stat_fns: &[StatFn],
) -> AggregateResult
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups: BTreeMap<GroupKey, Vec<Vec<f64>>> = group_by
        .fixed_keys()
        .into_iter()
        .map(|key| (key, vec![Vec::new(); columns.len()]))
        .collect();

    for record in records {
        let values = groups
            .entry(group_by.key(record))
            .or_insert_with(|| vec![Vec::new(); columns.len()]);
        for (bucket, column) in values.iter_mut().zip(columns) {
            bucket.push(column.value(record));
        }
    }

    let rows = groups
        .into_iter()
        .map(|(key, values)| AggregateRow {
            key,
            stats: values.iter().map(|v| Stats::compute(v)).collect(),
        })
        .collect();

    AggregateResult {
        group_by,
        columns: columns.to_vec(),
        stat_fns: stat_fns.to_vec(),
        rows,
    }
}
