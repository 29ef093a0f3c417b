use eframe::egui;

use crate::dashboard::build_panels;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SchoolDashboardApp {
    pub state: AppState,
}

impl SchoolDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SchoolDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the selected page, rebuilt from disk ----
        let view = build_panels(&self.state.data_dir, &self.state.request());
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard(ui, &view, &mut self.state);
        });
    }
}
