/// Bottom status bar: request progress and a summary of the current tree.
use crate::state::{AppPhase, AppState};
use foldersize_core::model::size::{format_count, format_size};
use egui::Ui;

/// Draw the status bar at the bottom of the window.
pub fn status_bar(ui: &mut Ui, state: &AppState) {
    let color_accent = ui.visuals().hyperlink_color;
    let color_weak = ui.visuals().weak_text_color();
    let color_normal = ui.visuals().text_color();

    ui.horizontal(|ui| match state.phase {
        AppPhase::Waiting => {
            ui.spinner();
            let target = state
                .pending
                .as_ref()
                .and_then(|h| h.selection.as_ref())
                .map(|p| truncate_path(&p.to_string_lossy(), 60))
                .unwrap_or_default();
            ui.label(
                egui::RichText::new(format!("Scanning {target}..."))
                    .size(12.0)
                    .color(color_normal),
            );
        }
        AppPhase::Idle => {
            let Some(loaded_at) = state.loaded_at else {
                ui.label(egui::RichText::new("Ready").size(12.0).color(color_weak));
                return;
            };

            if let Some(ref path) = state.source_path {
                ui.label(
                    egui::RichText::new(truncate_path(&path.to_string_lossy(), 60))
                        .size(12.0)
                        .color(color_normal),
                );
                ui.separator();
            }

            ui.label(
                egui::RichText::new(format!(
                    "{} entries",
                    format_count(state.entry_count() as u64)
                ))
                .size(12.0)
                .color(color_normal),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format_size(state.total_size()))
                    .size(12.0)
                    .color(color_accent),
            );
            ui.separator();
            ui.label(
                egui::RichText::new(format!("loaded {}", loaded_at.format("%H:%M:%S")))
                    .size(12.0)
                    .color(color_weak),
            );
        }
    });
}

/// Shorten `path` to at most `max_len` characters by replacing the middle
/// with "...".
fn truncate_path(path: &str, max_len: usize) -> String {
    let chars: Vec<char> = path.chars().collect();
    if chars.len() <= max_len {
        return path.to_string();
    }
    let half = (max_len - 3) / 2;
    let head: String = chars[..half].iter().collect();
    let tail: String = chars[chars.len() - half..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::truncate_path;

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("/short", 60), "/short");
        let long = format!("/{}", "é".repeat(100));
        let cut = truncate_path(&long, 21);
        assert_eq!(cut.chars().count(), 21);
        assert!(cut.starts_with('/'));
        assert!(cut.contains("..."));
    }
}
