// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! ToyFS: an in-memory filesystem namespace.
//!
//! A tree of directories and files with opaque handles, sequential inode
//! numbers, sizes and timestamps. `FS` owns the tree and applies every
//! mutation; the `path`, `metadata`, `tree_format` and `snapshot` modules
//! are read-side helpers built on its queries.
//!
//! ```
//! use toyfs::{EntryType, FS};
//!
//! let mut fs = FS::new();
//! let home = fs.lookup_child(fs.root(), "home").unwrap().unwrap();
//! let note = fs.create_node(home, "note.txt", EntryType::File).unwrap();
//! fs.write_content(note, "hello").unwrap();
//! assert_eq!(fs.find_node(note).unwrap().size(), 5);
//! ```

mod config;
mod entry_type;
mod error;
mod fs;
mod inode;
mod invariants;
mod node;

pub mod metadata;
pub mod path;
pub mod snapshot;
pub mod tree_format;

pub use config::{DEFAULT_SEED_DIRECTORIES, FsConfig};
pub use entry_type::EntryType;
pub use error::{Error, Result};
pub use fs::FS;
pub use inode::InodeAllocator;
pub use metadata::NodeMetadata;
pub use node::{DEFAULT_BLOCK_SIZE, Inode, Node, NodeBody, NodeID, ROOT_NAME};
pub use snapshot::{Snapshot, SnapshotNode};

#[cfg(test)]
mod tests;
