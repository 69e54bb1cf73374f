// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Box-drawing rendering of a subtree.
//!
//! ```text
//! / [1] 3 items
//! ├── home [2] 1 items
//! │ └── note.txt [4] 0B
//! ...
//! ```
//!
//! A node with children gets a tee connector (`├─┬`, `└─┬`), a leaf a
//! plain one (`├──`, `└──`).

use std::fmt;

use crate::error::Result;
use crate::fs::FS;
use crate::node::{Node, NodeID};

/// One labelled node of a rendered tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub label: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Add a child node (builder pattern)
    pub fn with_child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    /// Mirror the subtree at `id`, keeping sibling order.
    pub fn from_fs(fs: &FS, id: NodeID) -> Result<Self> {
        let node = fs.find_node(id)?;
        let mut tree = TreeNode::new(label_for(node));
        if node.is_dir() {
            for child in fs.list_children(id)? {
                tree.children.push(TreeNode::from_fs(fs, child.id())?);
            }
        }
        Ok(tree)
    }
}

/// `name [inode] 12B` for files, `name [inode] 3 items` for directories
pub fn label_for(node: &Node) -> String {
    match node.children() {
        Some(children) => format!("{} [{}] {} items", node.name(), node.inode(), children.len()),
        None => format!("{} [{}] {}B", node.name(), node.inode(), node.size()),
    }
}

/// Render a tree with box-drawing connectors; every line ends with `\n`.
pub fn format_tree(root: &TreeNode) -> String {
    let mut out = String::new();
    out.push_str(&root.label);
    out.push('\n');
    write_children(&mut out, &root.children, "");
    out
}

fn write_children(out: &mut String, children: &[TreeNode], prefix: &str) {
    for (index, child) in children.iter().enumerate() {
        let last = index + 1 == children.len();
        let connector = match (last, child.children.is_empty()) {
            (false, true) => "├──",
            (true, true) => "└──",
            (false, false) => "├─┬",
            (true, false) => "└─┬",
        };

        out.push_str(prefix);
        out.push_str(connector);
        out.push(' ');
        out.push_str(&child.label);
        out.push('\n');

        if !child.children.is_empty() {
            let nested = format!("{}{} ", prefix, if last { ' ' } else { '│' });
            write_children(out, &child.children, &nested);
        }
    }
}

/// Render the subtree of the live tree rooted at `id`.
pub fn render_tree(fs: &FS, id: NodeID) -> Result<String> {
    Ok(format_tree(&TreeNode::from_fs(fs, id)?))
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_tree(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectors() {
        let root = TreeNode::new("root")
            .with_child(TreeNode::new("child1").with_child(TreeNode::new("grandchild1")))
            .with_child(TreeNode::new("child2"));

        let output = format_tree(&root);
        assert_eq!(
            output,
            "root\n├─┬ child1\n│ └── grandchild1\n└── child2\n"
        );
    }

    #[test]
    fn test_deep_last_branch() {
        let root = TreeNode::new("root").with_child(
            TreeNode::new("a").with_child(TreeNode::new("b").with_child(TreeNode::new("c"))),
        );

        let output = format_tree(&root);
        assert!(output.contains("└─┬ a"));
        assert!(output.contains("  └─┬ b"));
        assert!(output.contains("    └── c"));
    }

    #[test]
    fn test_render_live_tree() {
        let mut fs = FS::new();
        let home = fs.lookup_child(fs.root(), "home").unwrap().unwrap();
        let note = fs.create_file(home, "note.txt").unwrap();
        fs.write_content(note, "hello").unwrap();

        let output = render_tree(&fs, fs.root()).unwrap();
        assert_eq!(
            output,
            "/ [1] 2 items\n├─┬ home [2] 1 items\n│ └── note.txt [4] 5B\n└── tmp [3] 0 items\n"
        );
    }
}
