use eframe::egui::{self, ScrollArea, Ui};

use crate::data::pipeline::DashboardSummary;
use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeDashApp {
    pub state: AppState,
}

impl BikeDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BikeDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(summary) = &self.state.summary else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to view rentals  (File → Open…)");
                });
                return;
            };
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard(ui, summary, &self.state);
                });
        });
    }
}

fn dashboard(ui: &mut Ui, summary: &DashboardSummary, state: &AppState) {
    let colors = &state.colors;

    ui.heading("Bike Sharing Dashboard");
    ui.label("Rental patterns on working days vs weekends and across seasons.");
    ui.add_space(8.0);

    ui.heading("Rentals: working day vs weekend");
    tables::aggregate_table(ui, "hourly_table", &summary.hourly_trend);
    plot::hourly_chart(ui, &summary.hourly_trend, colors);
    ui.separator();

    ui.heading("Rentals by season");
    tables::aggregate_table(ui, "season_table", &summary.by_season);
    plot::season_chart(ui, &summary.by_season, colors);
    ui.separator();

    ui.heading("Rentals by month");
    tables::aggregate_table(ui, "month_table", &summary.by_month);
    plot::month_chart(ui, &summary.by_month, colors);
    ui.separator();

    ui.heading("Casual vs registered riders");
    tables::aggregate_table(ui, "user_type_table", &summary.by_user_type);
    plot::user_type_chart(ui, &summary.by_user_type, colors);
    ui.separator();

    if let Some(path) = &state.source_path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ui.small(format!("Data: bike-sharing dataset ({name})"));
    }
}
