use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::UserType;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Bike Sharing Dashboard");
    ui.label("Rental patterns by season, month and rider type");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let season_options = dataset.season_options.clone();

    // ---- Season ----
    ui.strong("Season");
    let mut season = state.criteria.season;
    egui::ComboBox::from_id_salt("season_select")
        .selected_text(season.map_or("All", |s| s.label()))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut season, None, "All");
            for s in season_options {
                ui.selectable_value(&mut season, Some(s), s.label());
            }
        });
    state.set_season(season);
    ui.add_space(8.0);

    // ---- Month range ----
    ui.strong("Month range");
    let mut min = state.criteria.month_range.min;
    let mut max = state.criteria.month_range.max;
    ui.add(egui::Slider::new(&mut min, 1..=12).text("From"));
    ui.add(egui::Slider::new(&mut max, 1..=12).text("To"));
    state.set_month_range(min, max);
    ui.add_space(8.0);

    // ---- User type ----
    ui.strong("User type");
    let mut user_type = state.criteria.user_type;
    for option in UserType::ALL {
        ui.radio_value(&mut user_type, option, option.label());
    }
    state.set_user_type(user_type);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(summary)) = (&state.dataset, &state.summary) {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                summary.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open bike-sharing data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
