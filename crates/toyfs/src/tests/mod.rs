mod snapshot;

use crate::fs::FS;
use crate::node::NodeID;

/// Handle of a seeded directory directly under the root.
fn seeded(fs: &FS, name: &str) -> NodeID {
    fs.lookup_child(fs.root(), name)
        .expect("root is a directory")
        .expect("seed directory exists")
}

/// Names of a directory's children, in listing order.
fn names(fs: &FS, dir: NodeID) -> Vec<String> {
    fs.list_children(dir)
        .expect("listable")
        .iter()
        .map(|n| n.name().to_string())
        .collect()
}
