use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::aggregate::{AggregateResult, StatFn};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Aggregate tables
// ---------------------------------------------------------------------------

/// Header text for every value column of `result`, one per (column, stat).
pub fn header_labels(result: &AggregateResult) -> Vec<String> {
    let multi = result.columns.len() > 1;
    result
        .columns
        .iter()
        .flat_map(|col| {
            result.stat_fns.iter().map(move |stat| {
                if multi {
                    format!("{} {}", col.name(), stat.name())
                } else {
                    stat.name().to_string()
                }
            })
        })
        .collect()
}

/// Render a statistic for a table cell. NaN stays visible as "NaN".
pub fn format_stat(stat: StatFn, value: f64) -> String {
    match stat {
        StatFn::Count => format!("{}", value as u64),
        _ if value.is_nan() => "NaN".to_string(),
        _ => format!("{value:.2}"),
    }
}

/// Render an [`AggregateResult`] as a striped table.
pub fn aggregate_table(ui: &mut Ui, id: &str, result: &AggregateResult) {
    if result.rows.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }
    if result.is_empty() {
        ui.small("No records match the current filters; statistics are undefined.");
    }

    let headers = header_labels(result);
    let key_header = result.group_by.label();

    TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .vscroll(false)
        .column(Column::auto().at_least(110.0))
        .columns(Column::auto().at_least(70.0), headers.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            header.col(|ui| {
                ui.strong(key_header);
            });
            for h in &headers {
                header.col(|ui| {
                    ui.strong(h.as_str());
                });
            }
        })
        .body(|mut body| {
            for row in &result.rows {
                body.row(ROW_HEIGHT, |mut table_row| {
                    table_row.col(|ui| {
                        ui.label(row.key.to_string());
                    });
                    for stats in &row.stats {
                        for &stat in &result.stat_fns {
                            table_row.col(|ui| {
                                ui.monospace(format_stat(stat, stats.get(stat)));
                            });
                        }
                    }
                });
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{aggregate, GroupBy};
    use crate::data::model::ValueColumn;

    #[test]
    fn single_column_headers_are_stat_names() {
        let result = aggregate(std::iter::empty(), GroupBy::Season, &[ValueColumn::Cnt], &StatFn::ALL);
        assert_eq!(header_labels(&result), vec!["mean", "median", "max", "min", "count"]);
    }

    #[test]
    fn multi_column_headers_are_prefixed() {
        let result = aggregate(
            std::iter::empty(),
            GroupBy::Overall,
            &[ValueColumn::Casual, ValueColumn::Registered],
            &[StatFn::Mean, StatFn::Max],
        );
        assert_eq!(
            header_labels(&result),
            vec!["casual mean", "casual max", "registered mean", "registered max"]
        );
    }

    #[test]
    fn stats_format() {
        assert_eq!(format_stat(StatFn::Mean, f64::NAN), "NaN");
        assert_eq!(format_stat(StatFn::Median, 12.346), "12.35");
        assert_eq!(format_stat(StatFn::Count, 3.0), "3");
        assert_eq!(format_stat(StatFn::Count, 0.0), "0");
    }
}
