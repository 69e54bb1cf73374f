use super::{names, seeded};
use crate::error::Error;
use crate::fs::FS;
use crate::node::{Inode, NodeID};
use crate::snapshot::{Snapshot, SnapshotNode};

fn populated() -> FS {
    let mut fs = FS::new();
    let home = seeded(&fs, "home");
    let tmp = seeded(&fs, "tmp");
    let docs = fs.create_dir(home, "docs").unwrap();
    let readme = fs.create_file(docs, "readme.md").unwrap();
    fs.write_content(readme, "# hi\n").unwrap();
    _ = fs.create_file(home, "zeta").unwrap();
    _ = fs.create_file(home, "alpha").unwrap();
    let scratch = fs.create_file(tmp, "scratch").unwrap();
    _ = fs.delete_node(scratch).unwrap();
    fs
}

#[test]
fn test_round_trip_preserves_tree() {
    let fs = populated();
    let snap = fs.snapshot().unwrap();
    let restored = FS::from_snapshot(snap.clone()).unwrap();

    assert_eq!(restored.root(), fs.root());
    assert_eq!(restored.len(), fs.len());
    assert_eq!(restored.next_inode(), fs.next_inode());
    assert_eq!(restored.snapshot().unwrap(), snap);

    let home = seeded(&restored, "home");
    assert_eq!(home, seeded(&fs, "home"));
    assert_eq!(names(&restored, home), vec!["docs", "zeta", "alpha"]);

    for id in fs.descendants(fs.root()).unwrap() {
        let before = fs.find_node(id).unwrap();
        let after = restored.find_node(id).unwrap();
        assert_eq!(after.inode(), before.inode());
        assert_eq!(after.name(), before.name());
        assert_eq!(after.parent(), before.parent());
        assert_eq!(after.body(), before.body());
        assert_eq!(
            after.modified().timestamp_micros(),
            before.modified().timestamp_micros()
        );
    }
    restored.check_invariants().unwrap();
}

#[test]
fn test_restored_allocator_continues() {
    let fs = populated();
    // the deleted scratch file held the last inode
    assert_eq!(fs.next_inode(), Inode::new(9));

    let mut restored = FS::from_snapshot(fs.snapshot().unwrap()).unwrap();
    let tmp = seeded(&restored, "tmp");
    let fresh = restored.create_file(tmp, "fresh").unwrap();
    assert_eq!(restored.find_node(fresh).unwrap().inode(), Inode::new(9));
}

#[test]
fn test_low_next_inode_is_raised() {
    let fs = populated();
    let mut snap = fs.snapshot().unwrap();
    snap.next_inode = Inode::new(2);

    let mut restored = FS::from_snapshot(snap).unwrap();
    let fresh = restored.create_file(restored.root(), "fresh").unwrap();
    // highest live inode is 7 (alpha)
    assert_eq!(restored.find_node(fresh).unwrap().inode(), Inode::new(8));
}

#[test]
fn test_json_round_trip() {
    let fs = populated();
    let json = fs.snapshot().unwrap().to_json().unwrap();
    assert!(json.contains("\"readme.md\""));

    let snap = Snapshot::from_json(&json).unwrap();
    let restored = FS::from_snapshot(snap).unwrap();
    let readme = crate::path::resolve(&restored, restored.root(), "/home/docs/readme.md").unwrap();
    assert_eq!(restored.read_content(readme).unwrap(), b"# hi\n");
}

#[test]
fn test_malformed_json() {
    assert!(matches!(Snapshot::from_json("{"), Err(Error::Serialization(_))));
    assert!(matches!(
        Snapshot::from_json(r#"{"next_inode": 2, "block_size": 4096}"#),
        Err(Error::Serialization(_))
    ));
}

fn leaf(name: &str, inode: u64) -> SnapshotNode {
    SnapshotNode {
        id: NodeID::generate(),
        inode: Inode::new(inode),
        name: name.to_string(),
        kind: crate::EntryType::File,
        size: 0,
        created: 0,
        modified: 0,
        content: Some(Vec::new()),
        children: None,
    }
}

fn base() -> Snapshot {
    FS::new().snapshot().unwrap()
}

fn assert_corrupt(snap: Snapshot) {
    match FS::from_snapshot(snap) {
        Err(Error::Corrupt(_)) => {}
        other => panic!("expected corrupt snapshot, got {:?}", other),
    }
}

#[test]
fn test_reject_duplicate_inode() {
    let mut snap = base();
    snap.root.children.as_mut().unwrap().push(leaf("dup", 2));
    assert_corrupt(snap);
}

#[test]
fn test_reject_duplicate_handle() {
    let mut snap = base();
    let mut twin = leaf("twin", 10);
    twin.id = snap.root.id;
    snap.root.children.as_mut().unwrap().push(twin);
    assert_corrupt(snap);
}

#[test]
fn test_reject_duplicate_sibling_names() {
    let mut snap = base();
    let children = snap.root.children.as_mut().unwrap();
    children.push(leaf("same", 10));
    children.push(leaf("same", 11));
    assert_corrupt(snap);
}

#[test]
fn test_reject_file_with_children() {
    let mut snap = base();
    let mut odd = leaf("odd", 10);
    odd.children = Some(vec![leaf("inner", 11)]);
    snap.root.children.as_mut().unwrap().push(odd);
    assert_corrupt(snap);
}

#[test]
fn test_reject_size_mismatch() {
    let mut snap = base();
    let mut wrong = leaf("wrong", 10);
    wrong.size = 3;
    snap.root.children.as_mut().unwrap().push(wrong);
    assert_corrupt(snap);

    let mut snap = base();
    snap.root.size = 1;
    assert_corrupt(snap);
}

#[test]
fn test_reject_bad_root() {
    let mut snap = base();
    snap.root.inode = Inode::new(5);
    assert_corrupt(snap);

    let mut snap = base();
    snap.root.name = "root".to_string();
    assert_corrupt(snap);

    let mut snap = base();
    snap.block_size = 0;
    assert_corrupt(snap);
}

#[test]
fn test_reject_invalid_child_name() {
    let mut snap = base();
    snap.root.children.as_mut().unwrap().push(leaf("a/b", 10));
    assert_corrupt(snap);
}

#[test]
fn test_accept_missing_content_as_empty() {
    let mut snap = base();
    let mut bare = leaf("bare", 10);
    bare.content = None;
    snap.root.children.as_mut().unwrap().push(bare);

    let mut fs = FS::from_snapshot(snap).unwrap();
    let bare = fs.lookup_child(fs.root(), "bare").unwrap().unwrap();
    assert_eq!(fs.read_content(bare).unwrap(), b"");
    // allocator moved past the restored inode
    let next = fs.create_file(fs.root(), "next").unwrap();
    assert_eq!(fs.find_node(next).unwrap().inode(), Inode::new(11));
}

#[test]
fn test_reject_child_inode_at_top_of_range() {
    let mut snap = base();
    snap.root.children.as_mut().unwrap().push(leaf("last", u64::MAX));
    assert_corrupt(snap);
}

#[test]
fn test_reject_next_inode_at_top_of_range() {
    let mut snap = base();
    snap.next_inode = Inode::new(u64::MAX);
    assert_corrupt(snap);
}

#[test]
fn test_create_fails_cleanly_when_inodes_run_out() {
    let mut snap = base();
    snap.next_inode = Inode::new(u64::MAX - 1);
    let mut fs = FS::from_snapshot(snap).unwrap();
    let root = fs.root();

    let last = fs.create_file(root, "last").unwrap();
    assert_eq!(fs.find_node(last).unwrap().inode(), Inode::new(u64::MAX - 1));

    let count = fs.len();
    assert!(matches!(fs.create_file(root, "more"), Err(Error::InvalidOperation(_))));
    assert_eq!(fs.len(), count);
    assert_eq!(names(&fs, root), vec!["home", "tmp", "last"]);
    fs.check_invariants().unwrap();
}

#[test]
fn test_reject_child_inode_not_above_root() {
    for inode in [0, 1] {
        let mut snap = base();
        snap.root.children.as_mut().unwrap().push(leaf("low", inode));
        assert_corrupt(snap);
    }
}

#[test]
fn test_invariants_flag_child_inode_not_above_root() {
    let fs = FS::new();
    let mut nodes = fs.nodes().clone();
    let home = seeded(&fs, "home");
    let node = nodes.get(&home).unwrap();
    let lowered = crate::node::Node::restore(
        node.id(),
        Inode::new(0),
        node.name().to_string(),
        node.parent(),
        node.size(),
        node.created(),
        node.modified(),
        node.body().clone(),
    );
    _ = nodes.insert(home, lowered);

    let broken = FS::from_parts(nodes, fs.root(), fs.allocator().clone(), fs.block_size());
    assert!(matches!(broken.check_invariants(), Err(Error::Corrupt(_))));
}
