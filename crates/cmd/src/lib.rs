// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The `toysh` console: text commands over one in-memory ToyFS tree.

pub mod commands;
pub mod config;
pub mod console;
pub mod shell;

pub use config::{CONFIG_ENV, config_path, load_config, render_config};
pub use console::{Console, Outcome};
pub use shell::{BANNER, run_lines, run_shell};

#[cfg(test)]
mod tests;
