/// Folder picker dialog.
///
/// A small modal window with a path field. OK requests the typed folder;
/// Cancel, Escape or closing the window count as a cancelled selection.
use crate::state::AppState;
use std::path::Path;

/// Draw the picker when it is open.
pub fn folder_picker(ctx: &egui::Context, state: &mut AppState) {
    if !state.picker.open {
        return;
    }

    let mut window_open = true;
    let mut confirmed = false;
    let mut cancelled = false;

    egui::Window::new("Select folder")
        .open(&mut window_open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([420.0, 0.0])
        .show(ctx, |ui| {
            ui.label("Folder to scan:");
            let field = ui.add(
                egui::TextEdit::singleline(&mut state.picker.path_input)
                    .desired_width(f32::INFINITY)
                    .hint_text("/path/to/folder"),
            );
            if field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                confirmed = true;
            }
            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                cancelled = true;
            }

            let is_dir = Path::new(state.picker.path_input.trim()).is_dir();
            if !is_dir {
                ui.label(
                    egui::RichText::new("Not an existing folder")
                        .size(11.0)
                        .color(ui.visuals().warn_fg_color),
                );
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(is_dir, egui::Button::new("OK")).clicked() {
                    confirmed = true;
                }
                if ui.button("Cancel").clicked() {
                    cancelled = true;
                }
            });
        });

    if confirmed {
        state.confirm_picker();
    } else if cancelled || !window_open {
        state.cancel_picker();
    }
}
