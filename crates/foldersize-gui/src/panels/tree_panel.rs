/// Main results panel: column header above the tree view.
use crate::state::AppState;
use crate::widgets;
use egui::Ui;

/// Draw the tree panel (central content area).
pub fn tree_panel(ui: &mut Ui, state: &AppState) {
    let muted = ui.visuals().weak_text_color();
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Name").size(12.0).color(muted));
        ui.label(egui::RichText::new("Size (bytes)").size(12.0).color(muted));
    });
    ui.separator();

    widgets::tree_view::tree_view(ui, state);
}
