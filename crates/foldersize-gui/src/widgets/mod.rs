/// UI widgets for the folder size viewer.

pub mod folder_picker;
pub mod status_bar;
pub mod toolbar;
pub mod tree_view;
