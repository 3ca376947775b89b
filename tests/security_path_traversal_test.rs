//! Path traversal prevention tests
//!
//! Logical paths that try to climb out of a directory container must never produce bytes
//! from outside its base, no matter how they are spelled.

mod common;

use common::{pack, write_tree};
use std::fs;
use tempfile::TempDir;
use wallpaper_assets::{
    ArchiveContainer, AssetError, Container, DirectoryContainer, LayeredContainer,
};

/// Helper: a secret next to (not inside) the container base
fn sandbox() -> (TempDir, DirectoryContainer) {
    let root = TempDir::new().unwrap();
    write_tree(
        root.path(),
        &[
            ("secret.txt", b"top secret"),
            ("wallpaper/scene.json", b"{}"),
            ("wallpaper/materials/a.tex", b"tex"),
        ],
    );
    let container = DirectoryContainer::new(root.path().join("wallpaper")).unwrap();
    (root, container)
}

#[test]
fn test_path_traversal_dot_dot() {
    let (_root, container) = sandbox();

    for path in ["../secret.txt", "materials/../../secret.txt", "..\\secret.txt"] {
        let result = container.read_file(path);
        assert!(
            matches!(result, Err(AssetError::NotFound(_))),
            "{} must not resolve",
            path
        );
        assert!(matches!(
            container.resolve(path),
            Err(AssetError::PathEscape { .. })
        ));
        assert!(!container.contains(path));
    }
}

#[test]
fn test_deep_traversal_to_system_files() {
    let (_root, container) = sandbox();

    let result = container.read_file("../../../../../../../../etc/passwd");
    assert!(result.unwrap_err().is_not_found());
    assert!(container
        .resolve_real_path("../../../../../../../../etc/passwd")
        .unwrap_err()
        .is_not_found());
}

#[test]
fn test_absolute_path_stays_inside_base() {
    let (root, container) = sandbox();
    let secret = root.path().join("secret.txt");

    // Leading slashes are relative to the base, never to the filesystem root
    let result = container.read_file(secret.to_str().unwrap());
    assert!(matches!(result, Err(AssetError::NotFound(_))));

    assert_eq!(container.read_file("/scene.json").unwrap(), *b"{}");
}

#[test]
fn test_traversal_that_lands_back_inside() {
    let (_root, container) = sandbox();

    assert_eq!(
        container.read_file("materials/../scene.json").unwrap(),
        *b"{}"
    );
}

#[cfg(unix)]
#[test]
fn test_symlink_escape() {
    let (root, container) = sandbox();
    std::os::unix::fs::symlink(
        root.path().join("secret.txt"),
        root.path().join("wallpaper/link.txt"),
    )
    .unwrap();

    assert!(matches!(
        container.read_file("link.txt"),
        Err(AssetError::NotFound(_))
    ));
    assert!(matches!(
        container.resolve("link.txt"),
        Err(AssetError::PathEscape { .. })
    ));
}

#[test]
fn test_layered_traversal_falls_through_to_not_found() {
    let (root, container) = sandbox();
    fs::write(root.path().join("other.txt"), b"outside").unwrap();

    let mut layered = LayeredContainer::new();
    layered.add(container);
    layered.add(ArchiveContainer::from_bytes("scene.pkg", pack(&[("x", b"y")])).unwrap());

    assert!(matches!(
        layered.read_file("../other.txt"),
        Err(AssetError::NotFound(_))
    ));
    assert!(!layered.contains("../other.txt"));
    assert_eq!(layered.locate("../other.txt"), None);
}

#[test]
fn test_archive_paths_are_plain_keys() {
    // Archive paths are never joined onto the filesystem, so ".." is just part of a name
    let archive =
        ArchiveContainer::from_bytes("scene.pkg", pack(&[("../../etc/passwd", b"fake")])).unwrap();

    assert_eq!(archive.read_file("../../etc/passwd").unwrap(), *b"fake");
    assert!(archive.resolve_real_path("../../etc/passwd").is_err());
}
