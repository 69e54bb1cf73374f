use toyfs::Node;
use toyfs::path::resolve;
use toyfs::tree_format::render_tree;

use super::{CommandError, CommandResult, one_operand, optional_operand};
use crate::console::Console;

/// One `ls -l` style row: mode, links, owner, group, size, mtime, name
fn long_entry(console: &Console, node: &Node) -> Result<String, CommandError> {
    let links = console.fs.stat(node.id())?.links;
    Ok(format!(
        "{} {:>2} root root {:>6} {} {}",
        node.kind().mode_string(),
        links,
        node.size(),
        node.modified().format("%b %d %H:%M"),
        node.name()
    ))
}

pub fn ls(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = optional_operand(args, "ls [path]")?.unwrap_or(".");
    let target = resolve(&console.fs, console.cwd, path)?;
    let node = console.fs.find_node(target)?;
    if node.is_file() {
        return Ok(vec![long_entry(console, node)?]);
    }

    console
        .fs
        .list_children(target)?
        .into_iter()
        .map(|child| long_entry(console, child))
        .collect()
}

pub fn cat(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = one_operand(args, "cat <file>")?;
    let target = resolve(&console.fs, console.cwd, path)?;
    let content = console.fs.read_content(target)?;
    Ok(String::from_utf8_lossy(content)
        .lines()
        .map(str::to_string)
        .collect())
}

pub fn stat(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = one_operand(args, "stat <path>")?;
    let target = resolve(&console.fs, console.cwd, path)?;
    let meta = console.fs.stat(target)?;
    Ok(meta.to_string().lines().map(str::to_string).collect())
}

pub fn tree(console: &mut Console, args: &[&str]) -> CommandResult {
    let path = optional_operand(args, "tree [path]")?.unwrap_or(".");
    let target = resolve(&console.fs, console.cwd, path)?;
    let drawing = render_tree(&console.fs, target)?;
    Ok(drawing.lines().map(str::to_string).collect())
}

pub fn dump(console: &mut Console, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::Usage("dump"));
    }
    let json = console.fs.snapshot()?.to_json()?;
    Ok(json.lines().map(str::to_string).collect())
}
