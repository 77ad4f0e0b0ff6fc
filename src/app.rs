use eframe::egui;

use crate::color::SeriesColors;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct OpoViewerApp {
    pub state: AppState,
    colors: SeriesColors,
}

impl OpoViewerApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            colors: SeriesColors::default(),
        }
    }
}

impl eframe::App for OpoViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: summary and selection ----
        egui::SidePanel::left("summary_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::scan_plots(ui, &self.state, &self.colors);
        });
    }
}
