mod app;
mod color;
mod data;
mod figure;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use app::OrbitsPlotterApp;
use data::loader;
use data::model::{KickTable, OrbitTable};
use eframe::egui;
use state::AppState;

const KICKS_FILE: &str = "kicks.data";
const ORBITS_FILE: &str = "orbits.data";
const GRID_FILE: &str = "grid.data";

/// Load the three input files from `dir`, in order. The first failure is
/// returned and later files are not read.
fn load_inputs(dir: &Path) -> Result<(KickTable, OrbitTable, OrbitTable)> {
    let kicks = loader::load_kicks(&dir.join(KICKS_FILE)).context("loading kick distribution")?;
    let orbits =
        loader::load_orbits(&dir.join(ORBITS_FILE)).context("loading orbit distribution")?;
    let grid = loader::load_grid(&dir.join(GRID_FILE)).context("loading grid of orbits")?;
    log::info!(
        "{} kicks, {} bound orbits, {} grid cells",
        kicks.len(),
        orbits.len(),
        grid.len()
    );
    Ok((kicks, orbits, grid))
}

fn main() -> Result<()> {
    env_logger::init();

    // Everything is loaded before any window opens.
    let (kicks, orbits, grid) = load_inputs(Path::new("."))?;

    let state = AppState::new(figure::build_figures(&kicks, &orbits, &grid));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(state.window_title())
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Orbits Plotter",
        options,
        Box::new(|_cc| Ok(Box::new(OrbitsPlotterApp::new(state)))),
    )
    .map_err(|e| anyhow!("plot window failed: {e}"))
}
