// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use diagnostics::*;
use toyfs::{FS, NodeID};

use crate::commands::{self, Action};

/// Lines kept for `history`; the oldest drops off first.
pub const HISTORY_LIMIT: usize = 64;

/// What the front end should do after a line has run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print these lines (possibly none)
    Lines(Vec<String>),
    /// Wipe the screen
    Clear,
    /// Leave the console
    Exit,
}

/// A session over one tree: the engine plus a working directory.
///
/// Every filesystem command goes through the owned `FS`, so whatever a
/// command changes is what later commands (and `tree`/`dump`) observe.
pub struct Console {
    pub(crate) fs: FS,
    pub(crate) cwd: NodeID,
    history: Vec<String>,
}

impl Console {
    pub fn new(fs: FS) -> Self {
        let cwd = fs.root();
        Self {
            fs,
            cwd,
            history: Vec::new(),
        }
    }

    pub fn fs(&self) -> &FS {
        &self.fs
    }

    pub fn cwd(&self) -> NodeID {
        self.cwd
    }

    /// Absolute path of the working directory
    pub fn cwd_path(&self) -> String {
        self.fs.path_of(self.cwd).unwrap_or_else(|_| "/".to_string())
    }

    /// Lines entered so far, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn prompt(&self) -> String {
        format!("root@toyfs:{}# ", self.cwd_path())
    }

    /// Run one input line.
    ///
    /// Blank lines produce no output. Unknown commands never touch the tree.
    /// Every other line, known or not, is added to the history.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Outcome::Lines(Vec::new());
        };
        self.remember(line.trim());
        let args: Vec<&str> = words.collect();

        let Some(spec) = commands::lookup(name) else {
            log_debug!("Unknown command {name}", name: name);
            return Outcome::Lines(vec![format!("{}: command not found", name)]);
        };

        let outcome = match spec.action {
            Action::Clear => Outcome::Clear,
            Action::Exit => Outcome::Exit,
            Action::Run(run) => match run(self, &args) {
                Ok(lines) => Outcome::Lines(lines),
                Err(err) => {
                    let message = err.to_string();
                    log_debug!("{name} failed: {message}", name: name, message: message);
                    Outcome::Lines(vec![format!("{}: {}", name, message)])
                }
            },
        };

        self.recover_cwd();
        outcome
    }

    fn remember(&mut self, line: &str) {
        if self.history.len() >= HISTORY_LIMIT {
            _ = self.history.remove(0);
        }
        self.history.push(line.to_string());
    }

    /// Fall back to the root when the working directory has been deleted.
    fn recover_cwd(&mut self) {
        if self.fs.find_node(self.cwd).is_err() {
            log_warn!("Working directory was removed, returning to /");
            self.cwd = self.fs.root();
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(FS::new())
    }
}
