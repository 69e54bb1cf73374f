// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use crate::node::NodeID;

pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur in namespace operations
///
/// A failed operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The handle does not resolve to any live node
    #[error("Node not found: {0}")]
    NotFound(NodeID),

    /// The operation is not valid for the node's kind, or targets the root
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A sibling already uses the name
    #[error("Entry already exists: {0}")]
    NameConflict(String),

    #[error("Invalid name: {0:?}")]
    InvalidName(String),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Path is empty")]
    EmptyPath,

    /// A snapshot or the live tree breaks a structural invariant
    #[error("Corrupt tree: {0}")]
    Corrupt(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn not_found(id: NodeID) -> Self {
        Error::NotFound(id)
    }

    pub fn invalid_operation<S: Into<String>>(reason: S) -> Self {
        Error::InvalidOperation(reason.into())
    }

    pub fn name_conflict<S: AsRef<str>>(name: S) -> Self {
        Error::NameConflict(name.as_ref().to_string())
    }

    pub fn invalid_name<S: AsRef<str>>(name: S) -> Self {
        Error::InvalidName(name.as_ref().to_string())
    }

    pub fn path_not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::PathNotFound(path.as_ref().display().to_string())
    }

    pub fn not_a_directory<P: AsRef<Path>>(path: P) -> Self {
        Error::NotADirectory(path.as_ref().display().to_string())
    }

    pub fn empty_path() -> Self {
        Error::EmptyPath
    }

    pub fn corrupt<S: Into<String>>(what: S) -> Self {
        Error::Corrupt(what.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Error {
        Error::Serialization(err.to_string())
    }
}
