/// Folder size viewer GUI: egui-based desktop frontend.
///
/// This crate contains all UI code. Decoding, rendering and scanning live in
/// `foldersize-core`.
pub mod app;
pub mod panels;
pub mod state;
pub mod widgets;

pub use app::FolderSizeApp;
pub use state::AppState;
