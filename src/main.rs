mod app;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Context};
use eframe::egui;

use app::OpoViewerApp;
use opo_scan_viewer::analysis::analyze;
use opo_scan_viewer::config::AnalysisConfig;
use opo_scan_viewer::data::loader::load_file;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AnalysisConfig::from_env()?;
    let path = config.results_path();
    log::info!("Looking at {}", path.display());

    let results =
        load_file(&path).with_context(|| format!("loading results {}", config.file_name))?;
    let report = analyze(&results, &config).context("analyzing results")?;
    print!("{report}");

    let state = AppState::with_report(config, results, report);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OPO Scan Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(OpoViewerApp::new(state)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
