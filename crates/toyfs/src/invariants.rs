// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::fs::FS;
use crate::node::{Inode, NodeBody, ROOT_NAME};

impl FS {
    /// Verifies every structural invariant of the tree.
    ///
    /// Returns the first violation found as `Error::Corrupt`.
    pub fn check_invariants(&self) -> Result<()> {
        let nodes = self.nodes();
        let root = self.find_node(self.root())?;
        if !root.is_dir() || root.parent().is_some() || root.name() != ROOT_NAME {
            return Err(Error::corrupt("root must be a parentless directory named '/'"));
        }
        if root.inode() != Inode::ROOT {
            return Err(Error::corrupt(format!("root has inode {}", root.inode())));
        }

        let next = self.allocator().peek();
        let mut inodes = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![self.root()];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(Error::corrupt(format!("node {} reachable twice", id)));
            }
            let node = nodes
                .get(&id)
                .ok_or_else(|| Error::corrupt(format!("dangling child handle {}", id)))?;
            if node.id() != id {
                return Err(Error::corrupt(format!("node {} stored under {}", node.id(), id)));
            }
            if id != self.root() && node.inode() <= Inode::ROOT {
                return Err(Error::corrupt(format!(
                    "'{}' has inode {}, at or below the root's",
                    node.name(),
                    node.inode()
                )));
            }
            if !inodes.insert(node.inode()) {
                return Err(Error::corrupt(format!("inode {} used twice", node.inode())));
            }
            if node.inode() >= next {
                return Err(Error::corrupt(format!(
                    "inode {} not below allocator value {}",
                    node.inode(),
                    next
                )));
            }

            match node.body() {
                NodeBody::File { content } => {
                    if node.size() != content.len() as u64 {
                        return Err(Error::corrupt(format!(
                            "file '{}' size {} but {} bytes of content",
                            node.name(),
                            node.size(),
                            content.len()
                        )));
                    }
                }
                NodeBody::Directory { children } => {
                    if node.size() != self.block_size() {
                        return Err(Error::corrupt(format!(
                            "directory '{}' size {} differs from block size",
                            node.name(),
                            node.size()
                        )));
                    }
                    let mut names = HashSet::new();
                    for child_id in children {
                        let child = nodes.get(child_id).ok_or_else(|| {
                            Error::corrupt(format!("dangling child handle {}", child_id))
                        })?;
                        if child.parent() != Some(id) {
                            return Err(Error::corrupt(format!(
                                "'{}' does not name its listing directory as parent",
                                child.name()
                            )));
                        }
                        if !names.insert(child.name()) {
                            return Err(Error::corrupt(format!(
                                "duplicate name '{}' in '{}'",
                                child.name(),
                                node.name()
                            )));
                        }
                    }
                    stack.extend(children.iter().copied());
                }
            }
        }

        if visited.len() != nodes.len() {
            return Err(Error::corrupt(format!(
                "{} nodes unreachable from the root",
                nodes.len() - visited.len()
            )));
        }
        Ok(())
    }
}
