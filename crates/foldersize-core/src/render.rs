/// Tree renderer: decoded entries -> display tree.
///
/// Produces a `ViewNode` tree with the same shape as the input, with every
/// size pre-formatted for display. The GUI paints this tree; the text
/// outline is used for clipboard export. Rendering is a pure function of its
/// input: no sorting, filtering or truncation happens here.
use crate::model::size::format_bytes;
use crate::model::FileSystemEntry;
use compact_str::CompactString;

/// Whether a view node is a leaf or a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    File,
    Directory,
}

/// One row of the rendered tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewNode {
    pub kind: ViewKind,
    pub name: CompactString,
    pub fullpath: String,
    /// Size with grouping separators, e.g. `"1,234,567 bytes"`.
    pub size_text: String,
    /// Rendered children. Always empty for files; may be empty for
    /// directories, which still render as an (empty) nested list.
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    #[inline]
    pub fn is_directory(&self) -> bool {
        self.kind == ViewKind::Directory
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ViewNode::node_count).sum::<usize>()
    }
}

/// Render every top-level entry, preserving order.
pub fn render_entries(entries: &[FileSystemEntry]) -> Vec<ViewNode> {
    entries.iter().map(render_entry).collect()
}

/// Render one entry and, for directories, its whole subtree.
pub fn render_entry(entry: &FileSystemEntry) -> ViewNode {
    match entry {
        FileSystemEntry::File(file) => ViewNode {
            kind: ViewKind::File,
            name: file.name.clone(),
            fullpath: file.fullpath.clone(),
            size_text: format_bytes(file.size),
            children: Vec::new(),
        },
        FileSystemEntry::Directory(dir) => ViewNode {
            kind: ViewKind::Directory,
            name: dir.name.clone(),
            fullpath: dir.fullpath.clone(),
            size_text: format_bytes(dir.size),
            children: render_entries(&dir.children),
        },
    }
}

/// Plain-text outline of a rendered tree, two spaces per level.
///
/// Files are written as `name (size)`, directories as `name/ size`.
pub fn render_text(nodes: &[ViewNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &ViewNode, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    match node.kind {
        ViewKind::File => {
            out.push_str(&format!("{} ({})\n", node.name, node.size_text));
        }
        ViewKind::Directory => {
            out.push_str(&format!("{}/ {}\n", node.name, node.size_text));
            for child in &node.children {
                write_node(out, child, depth + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DirectoryEntry, FileEntry};

    fn sample() -> Vec<FileSystemEntry> {
        let mut root = DirectoryEntry::new("root", "/root");
        root.children
            .push(FileEntry::new("a.txt", "/root/a.txt", 1_000).into());
        root.children
            .push(FileEntry::new("b.txt", "/root/b.txt", 2_000).into());
        root.children
            .push(DirectoryEntry::new("empty", "/root/empty").into());
        root.calculate_size();
        vec![root.into()]
    }

    #[test]
    fn test_render_formats_sizes() {
        let view = render_entries(&sample());
        assert_eq!(view.len(), 1);
        let root = &view[0];
        assert!(root.is_directory());
        assert_eq!(root.size_text, "3,000 bytes");

        let child_sizes: Vec<&str> = root.children.iter().map(|c| c.size_text.as_str()).collect();
        assert_eq!(child_sizes, vec!["1,000 bytes", "2,000 bytes", "0 bytes"]);
    }

    #[test]
    fn test_render_keeps_shape_and_count() {
        let entries = sample();
        let view = render_entries(&entries);
        let entry_count: usize = entries.iter().map(FileSystemEntry::node_count).sum();
        let view_count: usize = view.iter().map(ViewNode::node_count).sum();
        assert_eq!(entry_count, view_count);

        let names: Vec<&str> = view[0].children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "empty"]);
    }

    #[test]
    fn test_empty_directory_is_rendered() {
        let view = render_entries(&sample());
        let empty = &view[0].children[2];
        assert_eq!(empty.kind, ViewKind::Directory);
        assert!(empty.children.is_empty());
    }

    #[test]
    fn test_render_empty_input() {
        assert!(render_entries(&[]).is_empty());
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn test_render_text_outline() {
        let text = render_text(&render_entries(&sample()));
        assert_eq!(
            text,
            "root/ 3,000 bytes\n\
             \x20 a.txt (1,000 bytes)\n\
             \x20 b.txt (2,000 bytes)\n\
             \x20 empty/ 0 bytes\n"
        );
    }
}
