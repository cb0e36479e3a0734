/// Panel layouts composed from widgets.

pub mod tree_panel;
