use toyfs::Error;
use toyfs::path::resolve;

use super::{CommandError, CommandResult, optional_operand};
use crate::console::Console;

/// `cd` with no operand goes to the root.
pub fn cd(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = optional_operand(args, "cd [path]")?.unwrap_or("/");
    let target = resolve(&console.fs, console.cwd, path)?;
    if !console.fs.find_node(target)?.is_dir() {
        return Err(CommandError::Fs(Error::not_a_directory(path)));
    }
    console.cwd = target;
    Ok(Vec::new())
}

pub fn pwd(console: &mut Console, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::Usage("pwd"));
    }
    Ok(vec![console.fs.path_of(console.cwd)?])
}

/// Numbered past lines, this one included.
pub fn history(console: &mut Console, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::Usage("history"));
    }
    Ok(console
        .history()
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>5}  {}", i + 1, line))
        .collect())
}
