use diagnostics::*;
use toyfs::path::{resolve, resolve_parent};
use toyfs::{EntryType, Error};

use super::{CommandError, CommandResult, one_operand};
use crate::console::Console;

pub fn mkdir(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = one_operand(args, "mkdir <dir>")?;
    let (parent, name) = resolve_parent(&console.fs, console.cwd, path)?;
    _ = console.fs.create_node(parent, &name, EntryType::Directory)?;
    Ok(vec![format!("Directory '{}' created successfully", path)])
}

/// Creates an empty file, or refreshes the mtime of an existing entry.
pub fn touch(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = one_operand(args, "touch <file>")?;
    let (parent, name) = resolve_parent(&console.fs, console.cwd, path)?;
    if let Some(existing) = console.fs.lookup_child(parent, &name)? {
        console.fs.touch_node(existing)?;
        return Ok(Vec::new());
    }
    _ = console.fs.create_node(parent, &name, EntryType::File)?;
    Ok(vec![format!("File '{}' created successfully", path)])
}

/// Replaces a file's contents with the remaining words, creating it if needed.
pub fn write(console: &mut Console, args: &[&str]) -> CommandResult {
    let Some((path, words)) = args.split_first() else {
        return Err(CommandError::MissingOperand);
    };
    let text = words.join(" ");

    let (parent, name) = resolve_parent(&console.fs, console.cwd, path)?;
    let file = match console.fs.lookup_child(parent, &name)? {
        Some(existing) => existing,
        None => console.fs.create_node(parent, &name, EntryType::File)?,
    };
    let len = text.len();
    console.fs.write_content(file, text)?;
    Ok(vec![format!("Wrote {} bytes to '{}'", len, path)])
}

pub fn rm(console: &mut Console, args: &[&str]) -> CommandResult {
    const USAGE: &str = "rm [-r] <path>";
    let (recursive, path) = match args {
        ["-r" | "-rf" | "-R"] => return Err(CommandError::MissingOperand),
        ["-r" | "-rf" | "-R", path] => (true, *path),
        [flag, ..] if flag.starts_with('-') && flag.len() > 1 => {
            return Err(CommandError::Usage(USAGE));
        }
        rest => (false, one_operand(rest, USAGE)?),
    };

    let target = resolve(&console.fs, console.cwd, path)?;
    let is_dir = console.fs.find_node(target)?.is_dir();
    if is_dir && !recursive {
        return Err(CommandError::IsDirectory(path.to_string()));
    }

    let removed = console.fs.delete_node(target)? as u64;
    log_debug!("rm {path} removed {removed} nodes", path: path, removed: removed);
    let kind = if is_dir { "Directory" } else { "File" };
    Ok(vec![format!("{} '{}' removed successfully", kind, path)])
}

/// Removes a directory together with everything beneath it.
pub fn rmdir(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = one_operand(args, "rmdir <dir>")?;
    let target = resolve(&console.fs, console.cwd, path)?;
    if !console.fs.find_node(target)?.is_dir() {
        return Err(CommandError::Fs(Error::not_a_directory(path)));
    }
    _ = console.fs.delete_node(target)?;
    Ok(vec![format!("Directory '{}' removed successfully", path)])
}

/// Renames within the current parent; the second operand is a bare name.
pub fn mv(console: &mut Console, args: &[&str]) -> CommandResult {
    let [path, new_name] = args else {
        return Err(if args.len() < 2 {
            CommandError::MissingOperand
        } else {
            CommandError::Usage("mv <path> <new-name>")
        });
    };
    let target = resolve(&console.fs, console.cwd, path)?;
    console.fs.rename_node(target, new_name)?;
    Ok(vec![format!("Renamed '{}' to '{}'", path, new_name)])
}
