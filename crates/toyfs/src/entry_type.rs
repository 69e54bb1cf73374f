// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

/// Kind of a namespace entry
///
/// Files and directories share one namespace per directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file entry with an opaque payload
    File,
    /// Directory entry owning an ordered list of children
    Directory,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::File => "file",
            EntryType::Directory => "directory",
        }
    }

    /// Long description used by `stat` output
    pub fn describe(&self) -> &'static str {
        match self {
            EntryType::File => "regular file",
            EntryType::Directory => "directory",
        }
    }

    /// Nominal `ls -l` mode string. Permissions are bookkeeping only.
    pub fn mode_string(&self) -> &'static str {
        match self {
            EntryType::File => "-rw-r--r--",
            EntryType::Directory => "drwxr-xr-x",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" | "f" => Ok(EntryType::File),
            "directory" | "dir" | "d" => Ok(EntryType::Directory),
            other => Err(format!("Unknown entry type: {}", other)),
        }
    }
}
