//! Folder Size Viewer: pick a folder, see the size of everything in it.
//!
//! Thin binary entry point. All logic lives in the `foldersize-core`
//! and `foldersize-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Folder Size Viewer starting");

    let state = foldersize_gui::AppState::new();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Folder Size Viewer")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FolderSize",
        options,
        Box::new(|cc| Ok(Box::new(foldersize_gui::FolderSizeApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
