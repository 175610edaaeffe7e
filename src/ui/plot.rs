use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, PlotUi, Points};

use crate::color::ColorMap;
use crate::data::aggregate::{AggregateResult, GroupKey, StatFn};
use crate::data::model::{DayType, Season, ValueColumn};

const CHART_HEIGHT: f32 = 260.0;

/// Drop points whose y is undefined (empty groups).
fn defined(points: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
    points.into_iter().filter(|p| p[1].is_finite()).collect()
}

/// Shared chart frame. Scrolling is left to the surrounding panel.
fn show_chart(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    x_range: Option<(f64, f64)>,
    x_ticks: Option<fn(f64) -> String>,
    add: impl FnOnce(&mut PlotUi),
) {
    let mut plot = Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(x_label)
        .y_axis_label("Mean rentals")
        .allow_scroll(false)
        .allow_drag(true)
        .allow_zoom(true)
        .allow_boxed_zoom(true);
    if let Some((lo, hi)) = x_range {
        plot = plot.include_x(lo).include_x(hi);
    }
    if let Some(label) = x_ticks {
        plot = plot.x_axis_formatter(move |mark, _range| label(mark.value));
    }
    plot.show(ui, add);
}

/// Tick text for the season axis: bar `i` is `Season::ALL[i]`.
/// Positions between bars get no label.
pub fn season_tick_label(value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    Season::ALL
        .get(idx as usize)
        .map(|s| s.label().to_string())
        .unwrap_or_default()
}

/// Mean `cnt` per hour as `[hour, mean]`, for one day type.
pub fn hourly_points(result: &AggregateResult, day: DayType) -> Vec<[f64; 2]> {
    let points = result
        .series(ValueColumn::Cnt, StatFn::Mean)
        .into_iter()
        .filter_map(|(key, mean)| match key {
            GroupKey::DayHour(d, hour) if d == day => Some([f64::from(hour), mean]),
            _ => None,
        })
        .collect();
    defined(points)
}

// ---------------------------------------------------------------------------
// Hourly trend: working day vs weekend
// ---------------------------------------------------------------------------

pub fn hourly_chart(ui: &mut Ui, result: &AggregateResult, colors: &ColorMap) {
    show_chart(ui, "hourly_trend", "Hour of day", Some((0.0, 23.0)), None, |plot_ui| {
        for day in DayType::ALL {
            let color = colors.color_for(day.label());
            let pts = hourly_points(result, day);
            plot_ui.line(
                Line::new(PlotPoints::from(pts.clone()))
                    .name(day.label())
                    .color(color)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(pts))
                    .name(day.label())
                    .color(color)
                    .radius(3.0),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Season: mean per season, canonical order
// ---------------------------------------------------------------------------

pub fn season_chart(ui: &mut Ui, result: &AggregateResult, colors: &ColorMap) {
    let series = result.series(ValueColumn::Cnt, StatFn::Mean);
    show_chart(ui, "season_chart", "Season", None, Some(season_tick_label as fn(f64) -> String), |plot_ui| {
        for (i, (key, mean)) in series.into_iter().enumerate() {
            if !mean.is_finite() {
                continue;
            }
            let label = key.to_string();
            let color = colors.color_for(&label);
            let bar = Bar::new(i as f64, mean).name(&label).fill(color).width(0.6);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(&label).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// Month: mean per month
// ---------------------------------------------------------------------------

pub fn month_chart(ui: &mut Ui, result: &AggregateResult, colors: &ColorMap) {
    let points: Vec<[f64; 2]> = result
        .series(ValueColumn::Cnt, StatFn::Mean)
        .into_iter()
        .filter_map(|(key, mean)| match key {
            GroupKey::Month(m) => Some([f64::from(m), mean]),
            _ => None,
        })
        .collect();
    let points = defined(points);
    let color = colors.color_for(ValueColumn::Cnt.label());

    show_chart(ui, "month_chart", "Month", Some((1.0, 12.0)), None, |plot_ui| {
        plot_ui.line(
            Line::new(PlotPoints::from(points.clone()))
                .name("Mean rentals")
                .color(color)
                .width(2.0),
        );
        plot_ui.points(Points::new(PlotPoints::from(points)).color(color).radius(3.0));
    });
}

// ---------------------------------------------------------------------------
// User type: mean per selected rider column
// ---------------------------------------------------------------------------

pub fn user_type_chart(ui: &mut Ui, result: &AggregateResult, colors: &ColorMap) {
    show_chart(ui, "user_type_chart", "User type", None, None, |plot_ui| {
        for (i, &column) in result.columns.iter().enumerate() {
            let Some(stats) = result.get(GroupKey::Overall, column) else {
                continue;
            };
            if !stats.mean.is_finite() {
                continue;
            }
            let color = colors.color_for(column.label());
            let bar = Bar::new(i as f64, stats.mean)
                .name(column.label())
                .fill(color)
                .width(0.5);
            plot_ui.bar_chart(BarChart::new(vec![bar]).name(column.label()).color(color));
        }
    });
}
