use eframe::egui::{self, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar. Returns `true` when the user asked to dismiss the
/// current figure.
pub fn top_bar(ui: &mut Ui, state: &AppState) -> bool {
    let mut dismiss = false;

    egui::menu::bar(ui, |ui: &mut Ui| {
        let Some(figure) = state.current() else {
            ui.label("No figure to show.");
            return;
        };

        let (i, n) = state.position();
        ui.label(RichText::new(format!("Figure {i} / {n}")).strong());
        ui.separator();
        ui.label(&figure.title);
        ui.separator();

        let text = if i < n { "Next figure ▶" } else { "Close" };
        if ui.button(text).clicked() {
            dismiss = true;
        }
    });

    dismiss
}
