// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::DEFAULT_BLOCK_SIZE;

/// Directories created under the root of a fresh tree, in this order
pub const DEFAULT_SEED_DIRECTORIES: [&str; 2] = ["home", "tmp"];

/// Engine configuration
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// block_size: 1024
/// seed_directories: [home, tmp, var]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FsConfig {
    /// Nominal size reported for every directory
    pub block_size: u64,
    /// Directories created under `/` at construction; they take the lowest
    /// inodes after the root
    pub seed_directories: Vec<String>,
}

impl Default for FsConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            seed_directories: DEFAULT_SEED_DIRECTORIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FsConfig {
    /// A tree holding only the root
    pub fn bare() -> Self {
        Self {
            seed_directories: Vec::new(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
