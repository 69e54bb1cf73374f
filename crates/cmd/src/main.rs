// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use diagnostics::*;

use cmd::{Console, config_path, load_config, render_config, run_lines, run_shell};
use toyfs::FS;
use toyfs::tree_format::render_tree;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "toysh")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Engine configuration file (YAML); defaults to $TOYFS_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive console reading commands from stdin (the default)
    Shell,
    /// Run each argument as a console line and print the output
    Exec {
        /// Console lines, e.g. "mkdir /home/docs" "ls /home"
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Print the freshly seeded tree
    Tree,
    /// Print the configuration in effect, defaults filled in
    Config,
}

fn main() -> Result<()> {
    diagnostics::init_diagnostics();
    let cli = Cli::parse();

    let config = load_config(config_path(cli.config).as_deref())?;
    let fs = FS::with_config(&config).context("Failed to build the filesystem from the configuration")?;
    let mut console = Console::new(fs);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            log_debug!("Starting interactive shell");
            run_shell(&mut console, std::io::stdin().lock(), &mut out)
        }
        Commands::Exec { lines } => run_lines(&mut console, &lines, &mut out),
        Commands::Tree => {
            let fs = console.fs();
            write!(out, "{}", render_tree(fs, fs.root())?)?;
            Ok(())
        }
        Commands::Config => {
            write!(out, "{}", render_config(&config)?)?;
            Ok(())
        }
    }
}
