/// End-to-end scanner tests.
///
/// These run the real `jwalk` walk against a temporary directory, then push
/// the JSON answer through the decoder and renderer exactly as the view does.
use foldersize_core::decoder::{decode_tree, try_decode_tree};
use foldersize_core::model::FileSystemEntry;
use foldersize_core::render::{render_entries, ViewNode};
use foldersize_core::scanner::{getdir, scan_directory, start_getdir, to_json, ScanOptions};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

/// ```text
/// root/
///   alpha/
///     a.txt   (100 bytes)
///     b.rs    (200 bytes)
///   beta/
///     c.png   (300 bytes)
///   empty/
///   d.zip     (400 bytes)
/// ```
fn build_test_tree(root: &Path) {
    let alpha = root.join("alpha");
    let beta = root.join("beta");
    fs::create_dir_all(&alpha).unwrap();
    fs::create_dir_all(&beta).unwrap();
    fs::create_dir_all(root.join("empty")).unwrap();

    write_bytes(&alpha.join("a.txt"), 100);
    write_bytes(&alpha.join("b.rs"), 200);
    write_bytes(&beta.join("c.png"), 300);
    write_bytes(&root.join("d.zip"), 400);
}

fn write_bytes(path: &Path, n: usize) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

fn child<'a>(entry: &'a FileSystemEntry, name: &str) -> &'a FileSystemEntry {
    entry
        .children()
        .iter()
        .find(|c| c.name() == name)
        .unwrap_or_else(|| panic!("{name} missing under {}", entry.name()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn scan_builds_nested_tree_with_sizes() {
    let tmp = TempDir::new().expect("failed to create temp dir");
    build_test_tree(tmp.path());

    let report = scan_directory(tmp.path(), &ScanOptions::default()).unwrap();
    assert_eq!(report.files, 4);
    assert_eq!(report.directories, 3);
    assert_eq!(report.error_count, 0);
    assert_eq!(report.root.size, 1_000);
    assert_eq!(report.root.name.as_str(), tmp.path().to_string_lossy());

    let root = FileSystemEntry::from(report.root);
    assert_eq!(root.node_count(), 8);
    assert_eq!(child(&root, "alpha").size(), 300);
    assert_eq!(child(&root, "beta").size(), 300);
    assert_eq!(child(&root, "empty").size(), 0);
    assert!(child(&root, "empty").children().is_empty());
    assert_eq!(child(child(&root, "alpha"), "b.rs").size(), 200);
}

#[test]
fn scan_orders_children_by_name() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let report = scan_directory(tmp.path(), &ScanOptions::default()).unwrap();
    let names: Vec<&str> = report.root.children.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["alpha", "beta", "d.zip", "empty"]);
}

#[test]
fn serial_and_parallel_scans_agree() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let serial = ScanOptions {
        threads: 1,
        ..ScanOptions::default()
    };
    let parallel = ScanOptions {
        threads: 4,
        ..ScanOptions::default()
    };
    let a = scan_directory(tmp.path(), &serial).unwrap();
    let b = scan_directory(tmp.path(), &parallel).unwrap();
    assert_eq!(a.root, b.root);
}

#[test]
fn scan_of_a_file_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("plain.txt");
    write_bytes(&file, 10);
    assert!(scan_directory(&file, &ScanOptions::default()).is_err());
    assert_eq!(getdir(Some(&file), &ScanOptions::default()), "");
}

#[test]
fn getdir_answer_decodes_to_the_scanned_tree() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let json = getdir(Some(tmp.path()), &ScanOptions::default());
    assert!(!json.is_empty());
    // The scanner writes the bare directory, so this goes through the
    // fallback branch of the decoder.
    assert!(!json.trim_start().starts_with("{\"DirectoryItem\""));

    let decoded = try_decode_tree(&json).unwrap();
    let rescanned = scan_directory(tmp.path(), &ScanOptions::default()).unwrap();
    assert_eq!(decoded, vec![FileSystemEntry::from(rescanned.root)]);
}

#[test]
fn decode_then_render_keeps_node_count() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let report = scan_directory(tmp.path(), &ScanOptions::default()).unwrap();
    let json = to_json(&report.root).unwrap();
    let entries = decode_tree(&json);
    let view = render_entries(&entries);

    let view_count: usize = view.iter().map(ViewNode::node_count).sum();
    assert_eq!(view_count, 8);
    assert_eq!(view[0].size_text, "1,000 bytes");
}

#[test]
fn background_getdir_answers() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());

    let handle = start_getdir(Some(tmp.path().to_path_buf()), ScanOptions::default()).unwrap();
    let answer = handle
        .recv_timeout(Duration::from_secs(30))
        .expect("getdir did not answer within 30 seconds");
    assert_eq!(decode_tree(&answer).len(), 1);
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed() {
    let tmp = TempDir::new().unwrap();
    build_test_tree(tmp.path());
    std::os::unix::fs::symlink(tmp.path().join("alpha"), tmp.path().join("link")).unwrap();

    let report = scan_directory(tmp.path(), &ScanOptions::default()).unwrap();
    assert_eq!(report.root.size, 1_000, "linked content must not be counted");
    assert!(report.root.children.iter().all(|c| c.name() != "link"));
}
