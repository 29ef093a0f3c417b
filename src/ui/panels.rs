use chrono::Local;
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::dashboard::Section;
use crate::data::catalog::Resource;
use crate::data::loader::resolve;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – navigation and date range
// ---------------------------------------------------------------------------

/// Render the left navigation panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("School Dashboard");
    ui.separator();

    ui.strong("Section");
    for section in Section::ALL {
        if ui
            .selectable_label(state.section == section, section.label())
            .clicked()
        {
            state.select_section(section);
        }
    }
    ui.separator();

    ui.strong(state.section.label());
    for &sub in state.section.sub_sections() {
        if ui
            .selectable_label(state.sub_section == sub, sub.label())
            .clicked()
        {
            state.select_sub_section(sub);
        }
    }
    ui.separator();

    // ---- Date range (only meaningful for trend views) ----
    ui.strong("Date range");
    ui.add_enabled_ui(state.sub_section.uses_date_range(), |ui: &mut Ui| {
        egui::Grid::new("date_range")
            .num_columns(2)
            .show(ui, |ui: &mut Ui| {
                ui.label("From");
                ui.add(DatePickerButton::new(&mut state.start).id_salt("range_start"));
                ui.end_row();

                ui.label("To");
                ui.add(DatePickerButton::new(&mut state.end).id_salt("range_end"));
                ui.end_row();
            });
        if ui.small_button("Reset to data extent").clicked() {
            state.reset_range(Local::now().date_naive());
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let found = Resource::ALL
            .iter()
            .filter(|r| resolve(&state.data_dir, r.name()).is_some())
            .count();
        ui.label(format!(
            "{} ({found}/{} data files)",
            state.data_dir.display(),
            Resource::ALL.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::LIGHT_GREEN));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Choose data folder")
        .set_directory(&state.data_dir)
        .pick_folder();

    if let Some(path) = folder {
        state.set_data_dir(path, Local::now().date_naive());
    }
}
