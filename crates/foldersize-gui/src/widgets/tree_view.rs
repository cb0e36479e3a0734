/// Tree view widget: paints the rendered `ViewNode` tree.
///
/// Directories are collapsible headers with their size; their children are
/// nested inside, and an empty directory still gets an (empty) body. Files
/// are plain rows with the size in parentheses. Nothing is sorted or hidden:
/// the whole tree is materialised, in payload order.
use crate::state::AppState;
use foldersize_core::render::{render_text, ViewKind, ViewNode};
use egui::{Sense, Ui};

/// Draw the tree view.
pub fn tree_view(ui: &mut Ui, state: &AppState) {
    if state.view.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Nothing to show. Click \"Select folder\" to scan a folder.")
                    .color(ui.visuals().weak_text_color()),
            );
        });
        return;
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (index, node) in state.view.iter().enumerate() {
                show_node(ui, node, index, 0);
            }
        });
}

fn show_node(ui: &mut Ui, node: &ViewNode, index: usize, depth: usize) {
    let color_weak = ui.visuals().weak_text_color();

    match node.kind {
        ViewKind::File => {
            let row = ui
                .horizontal(|ui| {
                    ui.label(egui::RichText::new(node.name.as_str()).size(13.0));
                    ui.label(
                        egui::RichText::new(format!("({})", node.size_text))
                            .size(12.0)
                            .color(color_weak),
                    );
                })
                .response
                .interact(Sense::click());
            row.context_menu(|ui| context_menu(ui, node));
        }
        ViewKind::Directory => {
            let header = egui::RichText::new(format!("📂 {}    {}", node.name, node.size_text))
                .size(13.0);
            let section = egui::CollapsingHeader::new(header)
                .id_salt((index, node.fullpath.as_str()))
                // Top-level folders start open so the first level is visible.
                .default_open(depth == 0)
                .show(ui, |ui| {
                    for (child_index, child) in node.children.iter().enumerate() {
                        show_node(ui, child, child_index, depth + 1);
                    }
                });
            section
                .header_response
                .context_menu(|ui| context_menu(ui, node));
        }
    }
}

/// Right-click menu for a row.
fn context_menu(ui: &mut Ui, node: &ViewNode) {
    if ui.button("📋 Copy path").clicked() {
        ui.ctx().copy_text(node.fullpath.clone());
        ui.close_menu();
    }
    if ui.button("📝 Copy as text").clicked() {
        ui.ctx().copy_text(render_text(std::slice::from_ref(node)));
        ui.close_menu();
    }
    ui.separator();
    ui.label(format!("Size: {}", node.size_text));
    if node.is_directory() {
        ui.label(format!("Entries: {}", node.node_count() - 1));
    }
}
