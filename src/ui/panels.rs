use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use opo_scan_viewer::analysis::ErrorSummary;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – summary, threshold, record selection
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Errors");
    ui.separator();

    let Some(report) = &state.report else {
        ui.label("No results loaded.");
        return;
    };

    // Copy what we need so we can mutate state below.
    let errors = report.errors;
    let reduced = report.reduced_errors;
    let selected = state.selected_record();
    let energies: Vec<f64> = state
        .results
        .as_ref()
        .map(|r| r.records.iter().map(|rec| rec.desired_energy).collect())
        .unwrap_or_default();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(format!("All steps ({})", errors.count));
            summary_grid(ui, "errors_all", &errors);

            ui.add_space(6.0);
            let mut threshold = state.config.outlier_threshold;
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Outlier threshold");
                let response = ui.add(
                    egui::DragValue::new(&mut threshold)
                        .speed(0.1)
                        .range(0.0..=1000.0)
                        .suffix(" cm⁻¹"),
                );
                if response.changed() {
                    state.set_outlier_threshold(threshold);
                }
            });
            ui.checkbox(&mut state.highlight_outliers, "Highlight outliers");

            if let Some(reduced) = &reduced {
                ui.add_space(6.0);
                ui.strong(format!("Without outliers ({})", reduced.count));
                summary_grid(ui, "errors_reduced", reduced);
            }
            ui.separator();

            // ---- Histogram record selector ----
            ui.strong("Wavelength histogram");
            let selected_text = selected
                .and_then(|i| energies.get(i))
                .map(|e| format!("{e} cm⁻¹"))
                .unwrap_or_else(|| "none".to_string());
            egui::ComboBox::from_id_salt("histogram_record")
                .selected_text(selected_text)
                .show_ui(ui, |ui: &mut Ui| {
                    for (i, energy) in energies.iter().enumerate() {
                        if ui
                            .selectable_label(selected == Some(i), format!("{i}: {energy} cm⁻¹"))
                            .clicked()
                        {
                            state.select_record(i);
                        }
                    }
                });

            if let Some(view) = state.report.as_ref().and_then(|r| r.histogram.as_ref()) {
                ui.label(format!("Expected nIR wavelength: {:.3} nm", view.desired_wl));
                ui.label(format!("Measured wavelength: {:.3} nm", view.wavelength));
                if let Some(first) = &view.first_pass {
                    ui.add_space(4.0);
                    ui.strong("First pass");
                    ui.label(format!(
                        "Wavemeter {:.3} nm vs OPO {:.3} nm ({:+.3} nm)",
                        first.wavelength,
                        first.opo_wl,
                        first.wavelength_offset()
                    ));
                    ui.label(format!("Energy: {:.3} cm⁻¹", first.energy));
                }
            }
        });
}

fn summary_grid(ui: &mut Ui, id: &str, summary: &ErrorSummary) {
    egui::Grid::new(id).num_columns(2).show(ui, |ui: &mut Ui| {
        for (label, value) in [
            ("average", summary.average),
            ("max", summary.max),
            ("min", summary.min),
            ("std dev", summary.std_dev),
        ] {
            ui.label(label);
            ui.label(format!("{value:.3} cm⁻¹"));
            ui.end_row();
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
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(results) = &state.results {
            ui.label(format!(
                "{}: {} scan steps, {} outliers",
                state.config.file_name,
                results.len(),
                state.outlier_indices().len()
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
        .set_title("Open measurement results")
        .set_directory(&state.config.results_dir)
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
