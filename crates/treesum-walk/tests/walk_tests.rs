use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use treesum_walk::{DirNode, TreeWalker, WalkConfig, WalkError, walk_sync};

/// A few directories deep, a few files wide, enough to exercise real
/// fan-out/fan-in rather than a single task.
fn create_nested_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    for outer in ["alpha", "beta", "gamma"] {
        let outer_path = root.join(outer);
        fs::create_dir(&outer_path).unwrap();
        fs::write(outer_path.join("data.bin"), vec![0u8; 100]).unwrap();
        for inner in ["one", "two"] {
            let inner_path = outer_path.join(inner);
            fs::create_dir(&inner_path).unwrap();
            fs::write(inner_path.join("leaf.txt"), outer).unwrap();
        }
    }
    fs::write(root.join("top.txt"), "0123456789").unwrap();

    temp
}

/// Check `size == own metadata size + Σ files + Σ dirs` for every node,
/// re-reading the directory's own size from the filesystem.
fn assert_size_invariant(node: &DirNode, path: &Path) {
    let own = fs::symlink_metadata(path).unwrap().len();
    assert_eq!(
        node.size,
        own + node.entries_size(),
        "invariant violated at {}",
        path.display()
    );
    for dir in &node.dirs {
        assert_size_invariant(dir, &path.join(dir.name.as_str()));
    }
}

/// Sibling completion order is unspecified, so trees are compared as
/// name → size maps per level rather than by position.
fn assert_same_tree(a: &DirNode, b: &DirNode) {
    assert_eq!(a.name, b.name);
    assert_eq!(a.size, b.size);

    let files_a: BTreeMap<_, _> = a.files.iter().map(|f| (f.name.clone(), f.size)).collect();
    let files_b: BTreeMap<_, _> = b.files.iter().map(|f| (f.name.clone(), f.size)).collect();
    assert_eq!(files_a, files_b);

    let dirs_a: BTreeMap<_, _> = a.dirs.iter().map(|d| (d.name.clone(), d)).collect();
    let dirs_b: BTreeMap<_, _> = b.dirs.iter().map(|d| (d.name.clone(), d)).collect();
    assert_eq!(
        dirs_a.keys().collect::<Vec<_>>(),
        dirs_b.keys().collect::<Vec<_>>()
    );
    for (name, dir_a) in &dirs_a {
        assert_same_tree(dir_a, dirs_b[name]);
    }
}

#[tokio::test]
async fn test_size_invariant_holds_everywhere() {
    let temp = create_nested_tree();
    let config = WalkConfig::new(temp.path());

    let tree = TreeWalker::new().walk(&config).await.unwrap();
    assert_size_invariant(&tree, temp.path());
}

#[tokio::test]
async fn test_concurrent_matches_baseline() {
    let temp = create_nested_tree();
    let config = WalkConfig::new(temp.path());

    let concurrent = TreeWalker::new().walk(&config).await.unwrap();
    let sequential = walk_sync(temp.path()).unwrap();

    assert_same_tree(&concurrent, &sequential);
    assert_eq!(concurrent.file_count(), sequential.file_count());
    assert_eq!(concurrent.dir_count(), sequential.dir_count());
}

#[tokio::test]
async fn test_bounded_walk_matches_unbounded() {
    let temp = create_nested_tree();
    let unbounded = TreeWalker::new()
        .walk(&WalkConfig::new(temp.path()))
        .await
        .unwrap();

    for limit in [1, 2, 8] {
        let config = WalkConfig::builder()
            .root(temp.path())
            .max_in_flight(Some(limit))
            .build()
            .unwrap();
        // A bounded walk must terminate, not deadlock, even at limit 1.
        let bounded = tokio::time::timeout(
            Duration::from_secs(30),
            TreeWalker::new().walk(&config),
        )
        .await
        .expect("bounded walk timed out")
        .unwrap();
        assert_eq!(bounded.size, unbounded.size);
    }
}

#[tokio::test]
async fn test_walk_is_idempotent() {
    let temp = create_nested_tree();
    let config = WalkConfig::new(temp.path());

    let walker = TreeWalker::new();
    let first = walker.walk(&config).await.unwrap();
    let second = walker.walk(&config).await.unwrap();

    assert_eq!(first.size, second.size);
    assert_same_tree(&first, &second);
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_subdirectory_fails_the_walk() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let locked = temp.path().join("outer").join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("hidden.txt"), "x").unwrap();
    fs::write(temp.path().join("visible.txt"), "y").unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged processes ignore mode bits; nothing to observe then.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let config = WalkConfig::new(temp.path());
    let result = TreeWalker::new().walk(&config).await;
    assert!(matches!(result, Err(WalkError::PermissionDenied { .. })));

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlinks_are_not_followed() {
    let target = TempDir::new().unwrap();
    fs::write(target.path().join("big.bin"), vec![0u8; 1_000_000]).unwrap();

    let temp = TempDir::new().unwrap();
    std::os::unix::fs::symlink(target.path().join("big.bin"), temp.path().join("link")).unwrap();

    let config = WalkConfig::new(temp.path());
    let tree = TreeWalker::new().walk(&config).await.unwrap();

    // The link counts with its own lstat size, not the 1 MB target.
    assert_eq!(tree.files.len(), 1);
    assert!(tree.size < 1_000_000);
    assert_size_invariant(&tree, temp.path());
}

#[tokio::test]
async fn test_single_file_root_is_not_a_directory() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("plain.txt");
    fs::write(&file, "not a dir").unwrap();

    let config = WalkConfig::new(&file);
    let result = TreeWalker::new().walk(&config).await;
    assert!(matches!(result, Err(WalkError::NotADirectory { .. })));
}
