//! Integration tests for DirectorySource over a real tree

use super::common::touch_all;
use filelinker::error::FlError;
use filelinker::source::{DirectorySource, SourceEnumerator};

fn paths(source: &DirectorySource) -> Vec<String> {
    let mut paths: Vec<String> = source
        .enumerate()
        .unwrap()
        .entries
        .into_iter()
        .map(|e| e.path)
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_walks_selected_directories_recursively() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(
        dir.path(),
        &[
            "coas/Blue Dream.pdf",
            "coas/2024/Sour Diesel.PDF",
            "coa/Legacy.pdf",
            "other/Ignored.pdf",
        ],
    );

    let source = DirectorySource::new(dir.path())
        .with_directories(["coas", "coa"])
        .with_extensions(["pdf"]);
    assert_eq!(
        paths(&source),
        vec![
            "coa/Legacy.pdf",
            "coas/2024/Sour Diesel.PDF",
            "coas/Blue Dream.pdf",
        ]
    );
}

#[test]
fn test_names_are_file_names() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["coas/nested/deep/Kush.pdf"]);

    let source = DirectorySource::new(dir.path()).with_directories(["coas"]);
    let enumeration = source.enumerate().unwrap();
    assert_eq!(enumeration.entries.len(), 1);
    assert_eq!(enumeration.entries[0].name, "Kush.pdf");
    assert_eq!(enumeration.entries[0].path, "coas/nested/deep/Kush.pdf");
}

#[test]
fn test_extension_filter() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["a.pdf", "b.txt", "c.PdF", "d"]);

    let pdf_only = DirectorySource::new(dir.path()).with_extensions(["pdf"]);
    assert_eq!(paths(&pdf_only), vec!["a.pdf", "c.PdF"]);

    let everything = DirectorySource::new(dir.path());
    assert_eq!(paths(&everything), vec!["a.pdf", "b.txt", "c.PdF", "d"]);
}

#[test]
fn test_missing_directory_is_partial() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["coas/Blue Dream.pdf"]);

    let source = DirectorySource::new(dir.path()).with_directories(["coas", "missing"]);
    let enumeration = source.enumerate().unwrap();
    assert_eq!(enumeration.entries.len(), 1);
    assert_eq!(enumeration.issues.len(), 1);
    assert_eq!(enumeration.issues[0].path, "missing");
}

#[test]
fn test_all_directories_missing_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path()).with_directories(["one", "two"]);

    match source.enumerate().unwrap_err() {
        FlError::Enumeration {
            failed_paths,
            message,
            ..
        } => {
            assert_eq!(failed_paths, 2);
            assert!(message.contains("one"));
            assert!(message.contains("two"));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_missing_base_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectorySource::new(dir.path().join("gone"));
    assert!(matches!(
        source.enumerate(),
        Err(FlError::Enumeration { failed_paths: 1, .. })
    ));
}

#[test]
fn test_empty_tree_is_ok() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("coas")).unwrap();
    let source = DirectorySource::new(dir.path()).with_directories(["coas"]);
    let enumeration = source.enumerate().unwrap();
    assert!(enumeration.entries.is_empty());
    assert!(enumeration.issues.is_empty());
}

#[cfg(unix)]
#[test]
fn test_symlinked_file_is_indexed() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["store/Blue Kush.pdf"]);
    std::fs::create_dir(dir.path().join("coas")).unwrap();
    std::os::unix::fs::symlink(
        dir.path().join("store/Blue Kush.pdf"),
        dir.path().join("coas/Link Kush.pdf"),
    )
    .unwrap();

    let source = DirectorySource::new(dir.path())
        .with_directories(["coas"])
        .with_extensions(["pdf"]);
    let enumeration = source.enumerate().unwrap();
    assert_eq!(enumeration.entries.len(), 1);
    assert_eq!(enumeration.entries[0].path, "coas/Link Kush.pdf");
    assert_eq!(enumeration.entries[0].name, "Link Kush.pdf");
    assert!(enumeration.issues.is_empty());
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["coas/Real.pdf"]);
    std::os::unix::fs::symlink(
        dir.path().join("nowhere.pdf"),
        dir.path().join("coas/Dangling.pdf"),
    )
    .unwrap();

    let source = DirectorySource::new(dir.path()).with_directories(["coas"]);
    let enumeration = source.enumerate().unwrap();
    assert_eq!(enumeration.entries.len(), 1);
    assert_eq!(enumeration.issues.len(), 1);
    assert!(enumeration.issues[0].path.contains("Dangling.pdf"));
}

#[test]
fn test_directory_outside_base_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    touch_all(dir.path(), &["catalog/coas/a.pdf", "private/secret.pdf"]);

    let source = DirectorySource::new(dir.path().join("catalog"))
        .with_directories(["coas", "../private"]);
    let enumeration = source.enumerate().unwrap();
    assert_eq!(enumeration.entries.len(), 1);
    assert_eq!(enumeration.issues.len(), 1);
    assert_eq!(enumeration.issues[0].path, "../private");
    assert_eq!(enumeration.issues[0].message, "Outside base directory");
}
