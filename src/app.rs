use eframe::egui::{self, ViewportCommand};

use crate::state::{AppState, Dismissal};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Shows the figures one after the other. Closing the window dismisses the
/// figure on screen; only the last dismissal actually closes it.
pub struct OrbitsPlotterApp {
    pub state: AppState,
}

impl OrbitsPlotterApp {
    pub fn new(state: AppState) -> Self {
        if let Some(fig) = state.current() {
            let (i, n) = state.position();
            log::info!("Showing figure {i}/{n}: {}", fig.title);
        }
        Self { state }
    }

    fn dismiss(&mut self, ctx: &egui::Context, close_requested: bool) {
        match self.state.dismiss() {
            Dismissal::Next => {
                if close_requested {
                    ctx.send_viewport_cmd(ViewportCommand::CancelClose);
                }
                ctx.send_viewport_cmd(ViewportCommand::Title(self.state.window_title()));
                if let Some(fig) = self.state.current() {
                    let (i, n) = self.state.position();
                    log::info!("Showing figure {i}/{n}: {}", fig.title);
                }
            }
            Dismissal::Finished => {
                log::info!("Last figure dismissed, exiting");
                if !close_requested {
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                }
            }
        }
    }
}

impl eframe::App for OrbitsPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.state.is_finished() {
            self.dismiss(ctx, true);
        }

        // ---- Top panel: figure counter ----
        let mut dismiss_clicked = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            dismiss_clicked = panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(figure) = self.state.current() {
                plot::figure_plot(ui, figure);
            }
        });

        if dismiss_clicked {
            self.dismiss(ctx, false);
        }
    }
}
