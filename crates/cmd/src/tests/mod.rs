
use crate::console::{Console, Outcome};

/// Run a line and return its printed lines; panics on clear/exit.
fn run(console: &mut Console, line: &str) -> Vec<String> {
    match console.execute(line) {
        Outcome::Lines(lines) => lines,
        other => panic!("'{}' produced {:?}", line, other),
    }
}
