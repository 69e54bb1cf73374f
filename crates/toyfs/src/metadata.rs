// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};

use crate::entry_type::EntryType;
use crate::error::Result;
use crate::fs::FS;
use crate::node::{Inode, NodeID};

/// Size of one block in `blocks` counts, as `stat(1)` reports them
pub const STAT_BLOCK_UNIT: u64 = 512;

/// Stat-style view of one node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMetadata {
    /// Absolute path of the node
    pub path: String,

    pub inode: Inode,

    pub kind: EntryType,

    /// Payload length for files, nominal block size for directories
    pub size: u64,

    /// `size` in 512-byte units, rounded up
    pub blocks: u64,

    /// The tree's block size
    pub io_block: u64,

    /// 1 for files; 2 plus the number of child directories for directories
    pub links: u64,

    /// Number of immediate children (None for files)
    pub children: Option<usize>,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl FS {
    /// Collects stat-style metadata for a node.
    pub fn stat(&self, id: NodeID) -> Result<NodeMetadata> {
        let node = self.find_node(id)?;
        let (links, children) = match node.children() {
            Some(_) => {
                let listing = self.list_children(id)?;
                let subdirs = listing.iter().filter(|c| c.is_dir()).count() as u64;
                (2 + subdirs, Some(listing.len()))
            }
            None => (1, None),
        };

        Ok(NodeMetadata {
            path: self.path_of(id)?,
            inode: node.inode(),
            kind: node.kind(),
            size: node.size(),
            blocks: node.size().div_ceil(STAT_BLOCK_UNIT),
            io_block: self.block_size(),
            links,
            children,
            created: node.created(),
            modified: node.modified(),
        })
    }
}

fn format_time(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.6f %z").to_string()
}

impl std::fmt::Display for NodeMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "  File: {}", self.path)?;
        writeln!(
            f,
            "  Size: {:<10} Blocks: {:<10} IO Block: {:<6} {}",
            self.size,
            self.blocks,
            self.io_block,
            self.kind.describe()
        )?;
        writeln!(f, " Inode: {:<10} Links: {}", self.inode, self.links)?;
        if let Some(children) = self.children {
            writeln!(f, " Items: {}", children)?;
        }
        writeln!(f, "Access: ({}) Uid: root Gid: root", self.kind.mode_string())?;
        writeln!(f, " Birth: {}", format_time(&self.created))?;
        write!(f, "Modify: {}", format_time(&self.modified))
    }
}
