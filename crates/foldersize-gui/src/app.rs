/// Main `eframe::App` implementation for the folder size viewer.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::state::{AppPhase, AppState};
use crate::widgets;

/// The folder size viewer application.
pub struct FolderSizeApp {
    state: AppState,
}

impl FolderSizeApp {
    /// Create the application from pre-built state.
    ///
    /// Build the state before `eframe::run_native` so the first frame has
    /// everything it needs.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state }
    }
}

impl eframe::App for FolderSizeApp {
    /// Match the GPU clear colour to the panel background so there is no
    /// flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Pick up the getdir answer ─────────────────────────────────────
        let _tree_changed = self.state.process_messages();

        // Keep polling while a request is in flight.
        if self.state.phase == AppPhase::Waiting {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Central panel (tree) ──────────────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::tree_panel::tree_panel(ui, &self.state);
        });

        // ── Folder picker dialog ──────────────────────────────────────────
        widgets::folder_picker::folder_picker(ctx, &mut self.state);
    }
}
