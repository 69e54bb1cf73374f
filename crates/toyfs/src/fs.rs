// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use chrono::Utc;
use diagnostics::*;

use crate::config::{DEFAULT_SEED_DIRECTORIES, FsConfig};
use crate::entry_type::EntryType;
use crate::error::{Error, Result};
use crate::inode::InodeAllocator;
use crate::node::{DEFAULT_BLOCK_SIZE, Inode, Node, NodeID, ROOT_NAME};
use crate::path::validate_name;

/// The namespace tree
///
/// Nodes live in an arena keyed by handle. A directory stores the ordered
/// handles of its children and exclusively owns them: deleting a directory
/// deletes its subtree. The root always exists.
///
/// Mutations take `&mut self`, so a `&Node` returned by a query cannot be
/// held across a change; resolve the handle again afterwards.
pub struct FS {
    nodes: HashMap<NodeID, Node>,
    root: NodeID,
    inodes: InodeAllocator,
    block_size: u64,
}

impl FS {
    /// Creates a tree with the root and the default seed directories
    /// (`/home`, `/tmp`).
    pub fn new() -> Self {
        let mut fs = Self::empty(DEFAULT_BLOCK_SIZE);
        for name in DEFAULT_SEED_DIRECTORIES {
            // a fresh allocator is nowhere near exhaustion
            _ = fs.attach(fs.root, name.to_string(), EntryType::Directory);
        }
        fs
    }

    /// Creates a tree from a configuration, seeding its directories in order.
    pub fn with_config(config: &FsConfig) -> Result<Self> {
        if config.block_size == 0 {
            return Err(Error::invalid_operation("block size must be positive"));
        }
        let mut fs = Self::empty(config.block_size);
        for name in &config.seed_directories {
            _ = fs.create_node(fs.root, name, EntryType::Directory)?;
        }
        Ok(fs)
    }

    fn empty(block_size: u64) -> Self {
        let mut inodes = InodeAllocator::new();
        let root = NodeID::generate();
        let inode = inodes.next_inode().unwrap_or(Inode::ROOT);
        let node = Node::new(
            root,
            inode,
            ROOT_NAME.to_string(),
            None,
            EntryType::Directory,
            block_size,
            Utc::now(),
        );
        let mut nodes = HashMap::new();
        _ = nodes.insert(root, node);
        FS {
            nodes,
            root,
            inodes,
            block_size,
        }
    }

    /// Assemble a tree from restored parts. Callers validate first.
    pub(crate) fn from_parts(
        nodes: HashMap<NodeID, Node>,
        root: NodeID,
        inodes: InodeAllocator,
        block_size: u64,
    ) -> Self {
        FS {
            nodes,
            root,
            inodes,
            block_size,
        }
    }

    pub(crate) fn nodes(&self) -> &HashMap<NodeID, Node> {
        &self.nodes
    }

    pub(crate) fn allocator(&self) -> &InodeAllocator {
        &self.inodes
    }

    /// Handle of the root directory
    pub fn root(&self) -> NodeID {
        self.root
    }

    /// Nominal size of every directory
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Number of live nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root cannot be removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The inode the next created node will receive
    pub fn next_inode(&self) -> Inode {
        self.inodes.peek()
    }

    /// Looks up a node by handle anywhere in the tree.
    pub fn find_node(&self, id: NodeID) -> Result<&Node> {
        self.nodes.get(&id).ok_or(Error::not_found(id))
    }

    fn find_node_mut(&mut self, id: NodeID) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(Error::not_found(id))
    }

    fn child_named(&self, dir: &Node, name: &str) -> Option<NodeID> {
        dir.children()?
            .iter()
            .copied()
            .find(|c| self.nodes.get(c).is_some_and(|n| n.name() == name))
    }

    /// Finds the child of `dir` called `name`.
    pub fn lookup_child(&self, dir: NodeID, name: &str) -> Result<Option<NodeID>> {
        let node = self.find_node(dir)?;
        if !node.is_dir() {
            return Err(Error::invalid_operation(format!(
                "'{}' is not a directory",
                node.name()
            )));
        }
        Ok(self.child_named(node, name))
    }

    /// Returns the parent handle, `None` for the root.
    pub fn parent_of(&self, id: NodeID) -> Result<Option<NodeID>> {
        Ok(self.find_node(id)?.parent())
    }

    /// Absolute path of a node; `/` for the root.
    pub fn path_of(&self, id: NodeID) -> Result<String> {
        let mut names = Vec::new();
        let mut current = self.find_node(id)?;
        while let Some(parent) = current.parent() {
            names.push(current.name());
            current = self.find_node(parent)?;
        }
        names.reverse();
        Ok(format!("/{}", names.join("/")))
    }

    /// Returns the live ordered list of a directory's immediate children.
    pub fn list_children(&self, dir: NodeID) -> Result<Vec<&Node>> {
        let node = self.find_node(dir)?;
        let children = node.children().ok_or_else(|| {
            Error::invalid_operation(format!("cannot list file '{}'", node.name()))
        })?;
        Ok(children.iter().filter_map(|c| self.nodes.get(c)).collect())
    }

    /// Pre-order walk of the subtree at `id`, the node itself first.
    /// Siblings appear in insertion order.
    pub fn descendants(&self, id: NodeID) -> Result<Vec<NodeID>> {
        _ = self.find_node(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            if let Some(children) = self.nodes.get(&next).and_then(Node::children) {
                stack.extend(children.iter().rev());
            }
        }
        Ok(out)
    }

    /// Creates a node inside an existing directory.
    ///
    /// The new node is appended after its existing siblings. All checks run
    /// before an inode is drawn, so a failure consumes nothing.
    pub fn create_node(&mut self, parent: NodeID, name: &str, kind: EntryType) -> Result<NodeID> {
        let dir = self.find_node(parent)?;
        if !dir.is_dir() {
            return Err(Error::invalid_operation(format!(
                "cannot create '{}' inside file '{}'",
                name,
                dir.name()
            )));
        }
        validate_name(name)?;
        if self.child_named(dir, name).is_some() {
            return Err(Error::name_conflict(name));
        }

        let id = self.attach(parent, name.to_string(), kind)?;
        let inode = self.nodes.get(&id).map_or(0, |n| n.inode().as_u64());
        let kind = kind.as_str();
        log_debug!("Created {kind} {name} with inode {inode}", kind: kind, name: name, inode: inode);
        Ok(id)
    }

    pub fn create_file(&mut self, parent: NodeID, name: &str) -> Result<NodeID> {
        self.create_node(parent, name, EntryType::File)
    }

    pub fn create_dir(&mut self, parent: NodeID, name: &str) -> Result<NodeID> {
        self.create_node(parent, name, EntryType::Directory)
    }

    /// Inserts a node without validation. `parent` must be a live directory.
    ///
    /// Fails, changing nothing, when no inode is left to issue.
    fn attach(&mut self, parent: NodeID, name: String, kind: EntryType) -> Result<NodeID> {
        let inode = self
            .inodes
            .next_inode()
            .ok_or_else(|| Error::invalid_operation("inode numbers exhausted"))?;
        let id = loop {
            let candidate = NodeID::generate();
            if !self.nodes.contains_key(&candidate) {
                break candidate;
            }
        };
        let now = Utc::now();
        let node = Node::new(
            id,
            inode,
            name,
            Some(parent),
            kind,
            self.block_size,
            now,
        );
        _ = self.nodes.insert(id, node);
        if let Some(dir) = self.nodes.get_mut(&parent) {
            dir.push_child(id, now);
        }
        Ok(id)
    }

    /// Deletes a node and its entire subtree.
    ///
    /// Only the parent's `modified` time changes. Returns the number of
    /// nodes removed.
    pub fn delete_node(&mut self, target: NodeID) -> Result<usize> {
        let node = self.find_node(target)?;
        let parent = node
            .parent()
            .ok_or_else(|| Error::invalid_operation("cannot delete the root directory"))?;
        let name = node.name().to_string();

        let doomed = self.descendants(target)?;
        for id in &doomed {
            _ = self.nodes.remove(id);
        }
        if let Some(dir) = self.nodes.get_mut(&parent) {
            _ = dir.remove_child(target, Utc::now());
        }

        let name = name.as_str();
        let below = (doomed.len() - 1) as u64;
        log_debug!("Deleted {name} and {below} nodes beneath it", name: name, below: below);
        Ok(doomed.len())
    }

    /// Replaces a file's payload; `size` becomes the payload length.
    pub fn write_content<B: Into<Vec<u8>>>(&mut self, file: NodeID, bytes: B) -> Result<()> {
        let bytes = bytes.into();
        let len = bytes.len() as u64;
        let node = self.find_node_mut(file)?;
        node.set_content(bytes, Utc::now())?;
        let name = node.name();
        log_debug!("Wrote {len} bytes to {name}", len: len, name: name);
        Ok(())
    }

    pub fn read_content(&self, file: NodeID) -> Result<&[u8]> {
        let node = self.find_node(file)?;
        node.content().ok_or_else(|| {
            Error::invalid_operation(format!("cannot read directory '{}'", node.name()))
        })
    }

    /// Renames a node within its current directory.
    ///
    /// The node keeps its position among its siblings. Renaming to the
    /// current name is a no-op.
    pub fn rename_node(&mut self, target: NodeID, new_name: &str) -> Result<()> {
        let node = self.find_node(target)?;
        let parent = node
            .parent()
            .ok_or_else(|| Error::invalid_operation("cannot rename the root directory"))?;
        validate_name(new_name)?;
        if node.name() == new_name {
            return Ok(());
        }
        if self.child_named(self.find_node(parent)?, new_name).is_some() {
            return Err(Error::name_conflict(new_name));
        }

        let now = Utc::now();
        let node = self.find_node_mut(target)?;
        let old_name = node.name().to_string();
        node.set_name(new_name.to_string(), now);
        self.find_node_mut(parent)?.touch(now);

        let old_name = old_name.as_str();
        log_debug!("Renamed {old_name} to {new_name}", old_name: old_name, new_name: new_name);
        Ok(())
    }

    /// Refreshes a node's `modified` time without other changes.
    pub fn touch_node(&mut self, id: NodeID) -> Result<()> {
        self.find_node_mut(id)?.touch(Utc::now());
        Ok(())
    }
}

impl Default for FS {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FS{{nodes: {}, next_inode: {}}}",
            self.nodes.len(),
            self.inodes.peek()
        )
    }
}
