// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Path resolution over the namespace tree
//!
//! The engine itself works on handles. These helpers translate the textual
//! paths a console user types into handles, relative to a working directory.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::fs::FS;
use crate::node::NodeID;

/// Checks that `name` can be used as a single entry name.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\0']) {
        return Err(Error::invalid_name(name));
    }
    Ok(())
}

/// Extracts the final component of a path as a string, if it is a plain name
pub fn basename<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .components()
        .next_back()
        .and_then(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
}

/// Extracts the directory component of a path, if any
pub fn dirname<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    path.as_ref().parent().map(|x| x.to_path_buf())
}

/// Resolves `path` to a handle, starting at `cwd` for relative paths.
///
/// `..` at the root stays at the root. Passing through a file fails with
/// `NotADirectory`; a missing component fails with `PathNotFound`.
pub fn resolve<P: AsRef<Path>>(fs: &FS, cwd: NodeID, path: P) -> Result<NodeID> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::empty_path());
    }

    let mut current = cwd;
    _ = fs.find_node(current)?;

    for comp in path.components() {
        match comp {
            Component::Prefix(_) => {
                return Err(Error::invalid_name(path.display().to_string()));
            }
            Component::RootDir => current = fs.root(),
            Component::CurDir => {}
            Component::ParentDir => {
                let node = fs.find_node(current)?;
                if !node.is_dir() {
                    return Err(Error::not_a_directory(path));
                }
                current = node.parent().unwrap_or(current);
            }
            Component::Normal(name) => {
                let name = name
                    .to_str()
                    .ok_or_else(|| Error::invalid_name(path.display().to_string()))?;
                if !fs.find_node(current)?.is_dir() {
                    return Err(Error::not_a_directory(path));
                }
                current = fs
                    .lookup_child(current, name)?
                    .ok_or_else(|| Error::path_not_found(path))?;
            }
        }
    }

    Ok(current)
}

/// Splits `path` into its containing directory (resolved) and final name.
///
/// The final component need not exist. Used to create entries by path.
pub fn resolve_parent<P: AsRef<Path>>(fs: &FS, cwd: NodeID, path: P) -> Result<(NodeID, String)> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::empty_path());
    }

    let name = basename(path).ok_or_else(|| Error::invalid_name(path.display().to_string()))?;
    let dir = match dirname(path) {
        Some(parent) if !parent.as_os_str().is_empty() => resolve(fs, cwd, &parent)?,
        _ => cwd,
    };

    if !fs.find_node(dir)?.is_dir() {
        return Err(Error::not_a_directory(path));
    }
    Ok((dir, name))
}
