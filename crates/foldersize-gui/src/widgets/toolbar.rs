/// Top action bar: folder selection and theme toggle.
use crate::state::{AppPhase, AppState};
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new("📂 Folder Size Viewer")
                .size(18.0)
                .strong()
                .color(ui.visuals().hyperlink_color),
        );

        ui.separator();

        // Only one request may be in flight.
        let can_select = state.phase == AppPhase::Idle && !state.picker.open;
        let select_btn = ui
            .add_enabled(
                can_select,
                egui::Button::new("📂 Select folder").min_size(egui::vec2(110.0, 28.0)),
            )
            .on_hover_text("Pick a folder and show the size of everything in it");
        if select_btn.clicked() {
            state.open_picker();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_label = if state.dark_mode { "☀" } else { "🌙" };
            let theme_tip = if state.dark_mode {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui.button(theme_label).on_hover_text(theme_tip).clicked() {
                state.dark_mode = !state.dark_mode;
            }
        });
    });
}
