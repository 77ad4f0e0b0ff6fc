use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use opo_scan_viewer::analysis::{AnalysisReport, HistogramView};
use opo_scan_viewer::data::model::Phase;

use crate::color::SeriesColors;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scan plots (central panel)
// ---------------------------------------------------------------------------

/// Render the energy, difference and histogram plots stacked vertically.
pub fn scan_plots(ui: &mut Ui, state: &AppState, colors: &SeriesColors) {
    let report = match &state.report {
        Some(report) => report,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a results file to view a scan  (File → Open…)");
            });
            return;
        }
    };

    let rows = if report.histogram.is_some() { 3.0 } else { 2.0 };
    let height = (ui.available_height() / rows - 8.0).max(120.0);

    energy_plot(ui, state, report, colors, height);
    difference_plot(ui, report, colors, height);
    if let Some(view) = &report.histogram {
        histogram_plot(ui, view, colors, height);
    }
}

fn energy_plot(
    ui: &mut Ui,
    state: &AppState,
    report: &AnalysisReport,
    colors: &SeriesColors,
    height: f32,
) {
    let outliers = if state.highlight_outliers {
        state.outlier_indices()
    } else {
        Vec::new()
    };

    Plot::new("energy_plot")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Step")
        .y_axis_label("Energy (cm⁻¹)")
        .show(ui, |plot_ui| {
            let expected: PlotPoints = report.energy.expected.iter().copied().collect();
            plot_ui.points(
                Points::new(expected)
                    .name("expected")
                    .color(colors.expected)
                    .radius(3.0),
            );

            let measured: PlotPoints = report
                .energy
                .measured
                .iter()
                .enumerate()
                .filter(|(i, _)| !outliers.contains(i))
                .map(|(_, p)| *p)
                .collect();
            plot_ui.points(
                Points::new(measured)
                    .name("measured")
                    .color(colors.measured)
                    .radius(3.0),
            );

            if !outliers.is_empty() {
                let flagged: PlotPoints = outliers
                    .iter()
                    .filter_map(|&i| report.energy.measured.get(i).copied())
                    .collect();
                plot_ui.points(
                    Points::new(flagged)
                        .name(format!("outlier (≥ {} cm⁻¹)", report.outlier_threshold))
                        .color(colors.outlier)
                        .radius(4.0),
                );
            }
        });
}

fn difference_plot(ui: &mut Ui, report: &AnalysisReport, colors: &SeriesColors, height: f32) {
    let bars: Vec<Bar> = report
        .energy
        .difference
        .iter()
        .map(|&[step, diff]| Bar::new(step, diff).width(0.05))
        .collect();

    Plot::new("difference_plot")
        .height(height)
        .x_axis_label("Step")
        .y_axis_label("Absolute difference (cm⁻¹)")
        .include_y(0.0)
        .include_y(report.energy.difference_axis_max())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("|expected − measured|")
                    .color(colors.difference),
            );
        });
}

fn histogram_plot(ui: &mut Ui, view: &HistogramView, colors: &SeriesColors, height: f32) {
    ui.label(format!(
        "Expected energy: {} cm⁻¹    Measured energy: {} cm⁻¹",
        view.desired_energy, view.energy
    ));

    Plot::new("wavelength_histogram")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Measured nIR wavelength (nm)")
        .y_axis_label("Count")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for phase in Phase::ALL {
                let hist = view.histogram(phase);
                let points: PlotPoints = hist.points().into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(format!("{phase} ({})", hist.total_count()))
                        .color(colors.phase(phase))
                        .radius(3.5),
                );
            }
        });
}
