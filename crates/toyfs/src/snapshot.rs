// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Serializable copy of a whole tree.
//!
//! A snapshot is a nested record of every node, children in insertion
//! order, plus the allocator position. Restoring one validates the same
//! invariants the live engine keeps. Timestamps are microseconds since the
//! Unix epoch.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use diagnostics::*;
use serde::{Deserialize, Serialize};

use crate::entry_type::EntryType;
use crate::error::{Error, Result};
use crate::fs::FS;
use crate::inode::InodeAllocator;
use crate::node::{Inode, Node, NodeBody, NodeID, ROOT_NAME};
use crate::path::validate_name;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Inode the restored allocator issues next (raised if not above every node)
    pub next_inode: Inode,
    pub block_size: u64,
    pub root: SnapshotNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub id: NodeID,
    pub inode: Inode,
    pub name: String,
    pub kind: EntryType,
    pub size: u64,
    pub created: i64,
    pub modified: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SnapshotNode>>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn timestamp(micros: i64, name: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
        .ok_or_else(|| Error::corrupt(format!("timestamp {} out of range on '{}'", micros, name)))
}

impl FS {
    /// Copy the tree into a nested record.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            next_inode: self.next_inode(),
            block_size: self.block_size(),
            root: self.snapshot_node(self.root())?,
        })
    }

    fn snapshot_node(&self, id: NodeID) -> Result<SnapshotNode> {
        let node = self.find_node(id)?;
        let (content, children) = match node.body() {
            NodeBody::File { content } => (Some(content.clone()), None),
            NodeBody::Directory { children } => {
                let nested = children
                    .iter()
                    .map(|c| self.snapshot_node(*c))
                    .collect::<Result<Vec<_>>>()?;
                (None, Some(nested))
            }
        };
        Ok(SnapshotNode {
            id: node.id(),
            inode: node.inode(),
            name: node.name().to_string(),
            kind: node.kind(),
            size: node.size(),
            created: node.created().timestamp_micros(),
            modified: node.modified().timestamp_micros(),
            content,
            children,
        })
    }

    /// Rebuild a tree from a snapshot.
    ///
    /// Fails with `Corrupt` on duplicate handles or inodes, duplicate
    /// sibling names, a malformed root, kind/field mismatches, a non-root
    /// inode not above the root's, or inodes so high nothing can follow.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<FS> {
        if snapshot.block_size == 0 {
            return Err(Error::corrupt("block size must be positive"));
        }
        let root = &snapshot.root;
        if root.kind != EntryType::Directory || root.name != ROOT_NAME || root.inode != Inode::ROOT {
            return Err(Error::corrupt("root must be directory '/' with inode 1"));
        }

        let mut restorer = Restorer {
            nodes: HashMap::new(),
            ids: HashSet::new(),
            inodes: HashSet::new(),
            max_inode: Inode::ROOT,
            block_size: snapshot.block_size,
        };
        let root_id = restorer.restore(snapshot.root, None)?;

        let mut allocator = InodeAllocator::new();
        let resumed = allocator.resume_after(restorer.max_inode).is_some()
            && allocator
                .resume_after(Inode::new(snapshot.next_inode.as_u64().saturating_sub(1)))
                .is_some();
        if !resumed || !allocator.has_room() {
            return Err(Error::corrupt(format!(
                "inodes up to {} and next inode {} leave no room to allocate",
                restorer.max_inode, snapshot.next_inode
            )));
        }

        let count = restorer.nodes.len() as u64;
        let fs = FS::from_parts(restorer.nodes, root_id, allocator, snapshot.block_size);
        fs.check_invariants()?;

        log_info!("Restored tree with {count} nodes", count: count);
        Ok(fs)
    }
}

struct Restorer {
    nodes: HashMap<NodeID, Node>,
    ids: HashSet<NodeID>,
    inodes: HashSet<Inode>,
    max_inode: Inode,
    block_size: u64,
}

impl Restorer {
    fn restore(&mut self, record: SnapshotNode, parent: Option<NodeID>) -> Result<NodeID> {
        if parent.is_some() {
            validate_name(&record.name).map_err(|e| Error::corrupt(e.to_string()))?;
        }
        if !self.ids.insert(record.id) {
            return Err(Error::corrupt(format!("handle {} used twice", record.id)));
        }
        if parent.is_some() && record.inode <= Inode::ROOT {
            return Err(Error::corrupt(format!(
                "'{}' has inode {}, at or below the root's",
                record.name, record.inode
            )));
        }
        if !self.inodes.insert(record.inode) {
            return Err(Error::corrupt(format!("inode {} used twice", record.inode)));
        }
        self.max_inode = self.max_inode.max(record.inode);

        let created = timestamp(record.created, &record.name)?;
        let modified = timestamp(record.modified, &record.name)?;

        let body = match (record.kind, record.content, record.children) {
            (EntryType::File, content, None) => {
                let content = content.unwrap_or_default();
                if record.size != content.len() as u64 {
                    return Err(Error::corrupt(format!(
                        "file '{}' size {} but {} bytes of content",
                        record.name,
                        record.size,
                        content.len()
                    )));
                }
                NodeBody::File { content }
            }
            (EntryType::Directory, None, children) => {
                if record.size != self.block_size {
                    return Err(Error::corrupt(format!(
                        "directory '{}' size {} differs from block size",
                        record.name, record.size
                    )));
                }
                let mut names = HashSet::new();
                let mut ids = Vec::new();
                for child in children.unwrap_or_default() {
                    if !names.insert(child.name.clone()) {
                        return Err(Error::corrupt(format!(
                            "duplicate name '{}' in '{}'",
                            child.name, record.name
                        )));
                    }
                    ids.push(self.restore(child, Some(record.id))?);
                }
                NodeBody::Directory { children: ids }
            }
            (EntryType::File, _, Some(_)) => {
                return Err(Error::corrupt(format!("file '{}' has children", record.name)));
            }
            (EntryType::Directory, Some(_), _) => {
                return Err(Error::corrupt(format!("directory '{}' has content", record.name)));
            }
        };

        let node = Node::restore(
            record.id,
            record.inode,
            record.name,
            parent,
            record.size,
            created,
            modified,
            body,
        );
        _ = self.nodes.insert(record.id, node);
        Ok(record.id)
    }
}
