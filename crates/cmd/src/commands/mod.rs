//! Console command table
//!
//! Each command is a plain function over the console and its arguments,
//! returning the lines to print.

pub mod mutate;
pub mod nav;
pub mod query;

use crate::console::Console;

pub type CommandResult = Result<Vec<String>, CommandError>;

pub type Handler = fn(&mut Console, &[&str]) -> CommandResult;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("missing operand")]
    MissingOperand,

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("cannot remove '{0}': Is a directory (use rm -r)")]
    IsDirectory(String),

    #[error("{0}")]
    Fs(#[from] toyfs::Error),
}

#[derive(Clone, Copy)]
pub enum Action {
    Run(Handler),
    Clear,
    Exit,
}

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    pub action: Action,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "Show this help message",
        action: Action::Run(help),
    },
    CommandSpec {
        name: "ls",
        usage: "ls [path]",
        summary: "List directory contents",
        action: Action::Run(query::ls),
    },
    CommandSpec {
        name: "cat",
        usage: "cat <file>",
        summary: "Display file contents",
        action: Action::Run(query::cat),
    },
    CommandSpec {
        name: "mkdir",
        usage: "mkdir <dir>",
        summary: "Create directory",
        action: Action::Run(mutate::mkdir),
    },
    CommandSpec {
        name: "touch",
        usage: "touch <file>",
        summary: "Create empty file",
        action: Action::Run(mutate::touch),
    },
    CommandSpec {
        name: "write",
        usage: "write <file> <text...>",
        summary: "Replace file contents",
        action: Action::Run(mutate::write),
    },
    CommandSpec {
        name: "rm",
        usage: "rm [-r] <path>",
        summary: "Remove file (-r for directories)",
        action: Action::Run(mutate::rm),
    },
    CommandSpec {
        name: "rmdir",
        usage: "rmdir <dir>",
        summary: "Remove directory",
        action: Action::Run(mutate::rmdir),
    },
    CommandSpec {
        name: "mv",
        usage: "mv <path> <new-name>",
        summary: "Rename in place",
        action: Action::Run(mutate::mv),
    },
    CommandSpec {
        name: "cd",
        usage: "cd [path]",
        summary: "Change directory",
        action: Action::Run(nav::cd),
    },
    CommandSpec {
        name: "pwd",
        usage: "pwd",
        summary: "Print working directory",
        action: Action::Run(nav::pwd),
    },
    CommandSpec {
        name: "history",
        usage: "history",
        summary: "List previously entered commands",
        action: Action::Run(nav::history),
    },
    CommandSpec {
        name: "stat",
        usage: "stat <path>",
        summary: "Show file statistics",
        action: Action::Run(query::stat),
    },
    CommandSpec {
        name: "tree",
        usage: "tree [path]",
        summary: "Draw the directory tree",
        action: Action::Run(query::tree),
    },
    CommandSpec {
        name: "dump",
        usage: "dump",
        summary: "Print the tree as JSON",
        action: Action::Run(query::dump),
    },
    CommandSpec {
        name: "clear",
        usage: "clear",
        summary: "Clear terminal",
        action: Action::Clear,
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the console",
        action: Action::Exit,
    },
];

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|c| c.name == name)
}

pub fn help_lines() -> Vec<String> {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        COMMANDS
            .iter()
            .map(|c| format!("  {:<22} - {}", c.usage, c.summary)),
    );
    lines
}

fn help(_console: &mut Console, _args: &[&str]) -> CommandResult {
    Ok(help_lines())
}

/// The single operand of a command, or the matching error.
pub(crate) fn one_operand<'a>(args: &[&'a str], usage: &'static str) -> Result<&'a str, CommandError> {
    match args {
        [] => Err(CommandError::MissingOperand),
        [only] => Ok(*only),
        _ => Err(CommandError::Usage(usage)),
    }
}

/// An optional single operand.
pub(crate) fn optional_operand<'a>(
    args: &[&'a str],
    usage: &'static str,
) -> Result<Option<&'a str>, CommandError> {
    match args {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        _ => Err(CommandError::Usage(usage)),
    }
}
