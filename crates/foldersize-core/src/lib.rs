/// Folder size viewer core: tree model, JSON decoding, rendering, scanning.
///
/// This crate has no UI dependencies. A frontend asks the scanner for a
/// `getdir` answer (a JSON string), decodes it with [`decoder::decode_tree`],
/// and displays the output of [`render::render_entries`].
///
/// # Modules
///
/// - [`model`]: `FileSystemEntry` tree and byte formatting.
/// - [`decoder`]: tolerant JSON payload decoding.
/// - [`render`]: display tree with formatted sizes.
/// - [`scanner`]: directory walk, JSON encoding and the `getdir` round trip.
pub mod decoder;
pub mod model;
pub mod render;
pub mod scanner;
