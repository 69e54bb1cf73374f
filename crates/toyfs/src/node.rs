// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entry_type::EntryType;
use crate::error::{Error, Result};

/// Name of the root directory
pub const ROOT_NAME: &str = "/";

/// Nominal size reported for every directory
pub const DEFAULT_BLOCK_SIZE: u64 = 4096;

/// Opaque handle for a node in the namespace
///
/// Generated from a UUIDv7 when the node is created. Stable for the node's
/// lifetime and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeID(uuid7::Uuid);

impl NodeID {
    pub fn generate() -> Self {
        Self(uuid7::uuid7())
    }
}

impl std::fmt::Display for NodeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for NodeID {
    type Err = uuid7::ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse::<uuid7::Uuid>().map(NodeID)
    }
}

impl Serialize for NodeID {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeID {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sequential inode number, unique for the tree's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inode(u64);

impl Inode {
    /// Reserved for the root directory
    pub const ROOT: Inode = Inode(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// The following inode number, `None` at the top of the range.
    pub(crate) fn successor(self) -> Option<Inode> {
        self.0.checked_add(1).map(Inode)
    }
}

impl std::fmt::Display for Inode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Kind-specific part of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    File { content: Vec<u8> },
    Directory { children: Vec<NodeID> },
}

/// One entry in the namespace
///
/// Nodes are owned by the `FS` arena. A directory lists its children by
/// handle, in insertion order.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeID,
    inode: Inode,
    name: String,
    parent: Option<NodeID>,
    size: u64,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    body: NodeBody,
}

impl Node {
    pub(crate) fn new(
        id: NodeID,
        inode: Inode,
        name: String,
        parent: Option<NodeID>,
        kind: EntryType,
        block_size: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let (size, body) = match kind {
            EntryType::File => (0, NodeBody::File { content: Vec::new() }),
            EntryType::Directory => (block_size, NodeBody::Directory { children: Vec::new() }),
        };
        Node {
            id,
            inode,
            name,
            parent,
            size,
            created: now,
            modified: now,
            body,
        }
    }

    /// Rebuild a node from stored fields; used when restoring snapshots.
    pub(crate) fn restore(
        id: NodeID,
        inode: Inode,
        name: String,
        parent: Option<NodeID>,
        size: u64,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
        body: NodeBody,
    ) -> Self {
        Node {
            id,
            inode,
            name,
            parent,
            size,
            created,
            modified,
            body,
        }
    }

    pub fn id(&self) -> NodeID {
        self.id
    }

    pub fn inode(&self) -> Inode {
        self.inode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` only for the root
    pub fn parent(&self) -> Option<NodeID> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn kind(&self) -> EntryType {
        match self.body {
            NodeBody::File { .. } => EntryType::File,
            NodeBody::Directory { .. } => EntryType::Directory,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.body, NodeBody::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.body, NodeBody::File { .. })
    }

    /// Payload length for files, the nominal block size for directories
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn content(&self) -> Option<&[u8]> {
        match &self.body {
            NodeBody::File { content } => Some(content),
            NodeBody::Directory { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&[NodeID]> {
        match &self.body {
            NodeBody::Directory { children } => Some(children),
            NodeBody::File { .. } => None,
        }
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.modified = now;
    }

    pub(crate) fn set_name(&mut self, name: String, now: DateTime<Utc>) {
        self.name = name;
        self.modified = now;
    }

    /// Replace the whole payload of a file.
    pub(crate) fn set_content(&mut self, bytes: Vec<u8>, now: DateTime<Utc>) -> Result<()> {
        match &mut self.body {
            NodeBody::File { content } => {
                self.size = bytes.len() as u64;
                *content = bytes;
                self.modified = now;
                Ok(())
            }
            NodeBody::Directory { .. } => Err(Error::invalid_operation(format!(
                "cannot write content to directory '{}'",
                self.name
            ))),
        }
    }

    /// Append a child handle; the caller guarantees this is a directory.
    pub(crate) fn push_child(&mut self, child: NodeID, now: DateTime<Utc>) {
        if let NodeBody::Directory { children } = &mut self.body {
            children.push(child);
            self.modified = now;
        }
    }

    /// Remove a child handle, keeping the order of the remaining siblings.
    pub(crate) fn remove_child(&mut self, child: NodeID, now: DateTime<Utc>) -> bool {
        if let NodeBody::Directory { children } = &mut self.body {
            if let Some(pos) = children.iter().position(|c| *c == child) {
                _ = children.remove(pos);
                self.modified = now;
                return true;
            }
        }
        false
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_parse_roundtrip() {
        let id = NodeID::generate();
        let parsed: NodeID = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<NodeID>().is_err());
    }

    #[test]
    fn test_node_ids_are_distinct() {
        let a = NodeID::generate();
        let b = NodeID::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_nodes_by_kind() {
        let now = Utc::now();
        let file = Node::new(
            NodeID::generate(),
            Inode::new(7),
            "a.txt".into(),
            Some(NodeID::generate()),
            EntryType::File,
            DEFAULT_BLOCK_SIZE,
            now,
        );
        assert_eq!(file.size(), 0);
        assert_eq!(file.content(), Some(&[][..]));
        assert!(file.children().is_none());
        assert_eq!(file.created(), file.modified());

        let dir = Node::new(
            NodeID::generate(),
            Inode::new(8),
            "d".into(),
            None,
            EntryType::Directory,
            DEFAULT_BLOCK_SIZE,
            now,
        );
        assert_eq!(dir.size(), DEFAULT_BLOCK_SIZE);
        assert!(dir.content().is_none());
        assert!(dir.is_root());
    }

    #[test]
    fn test_set_content_rejects_directory() {
        let now = Utc::now();
        let mut dir = Node::new(
            NodeID::generate(),
            Inode::new(2),
            "d".into(),
            None,
            EntryType::Directory,
            DEFAULT_BLOCK_SIZE,
            now,
        );
        assert!(matches!(
            dir.set_content(b"x".to_vec(), now),
            Err(Error::InvalidOperation(_))
        ));
        assert_eq!(dir.size(), DEFAULT_BLOCK_SIZE);
    }
}
