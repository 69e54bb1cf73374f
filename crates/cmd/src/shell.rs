// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented front ends for the console.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use diagnostics::*;

use crate::console::{Console, Outcome};

pub const BANNER: [&str; 2] = [
    "ToyFS Terminal Interface v1.0",
    "Type \"help\" for available commands",
];

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Interactive loop: prompt, read, execute, print, until EOF or `exit`.
pub fn run_shell<R: BufRead, W: Write>(console: &mut Console, mut input: R, out: &mut W) -> Result<()> {
    for line in BANNER {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;

    let mut line = String::new();
    loop {
        write!(out, "{}", console.prompt())?;
        out.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("Failed to read command")?;
        if read == 0 {
            writeln!(out)?;
            break;
        }

        match console.execute(&line) {
            Outcome::Lines(lines) => write_lines(out, &lines)?,
            Outcome::Clear => write!(out, "{}", CLEAR_SCREEN)?,
            Outcome::Exit => break,
        }
    }

    log_debug!("Shell finished");
    Ok(())
}

/// Runs each line as if typed at the prompt, echoing the prompt and line.
///
/// `clear` has no effect here; `exit` stops the remaining lines.
pub fn run_lines<W: Write>(console: &mut Console, lines: &[String], out: &mut W) -> Result<()> {
    for line in lines {
        writeln!(out, "{}{}", console.prompt(), line.trim())?;
        match console.execute(line) {
            Outcome::Lines(output) => write_lines(out, &output)?,
            Outcome::Clear => {}
            Outcome::Exit => break,
        }
    }
    Ok(())
}
