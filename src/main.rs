use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use thompson_regex::Regex;

/// The line that ends the session.
const QUIT: &str = "quit";

/// Interactively test strings against a regular expression.
///
/// Each line read from standard input is matched in full against PATTERN.
/// The session ends at end of input or when the line "quit" is read.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Pattern using literals, '|', '*' and parentheses.
    #[arg(default_value = "((Hello)|(Hi)) Worlds*")]
    pattern: String,

    /// Print the compiled automaton before reading input.
    #[arg(long)]
    dump: bool,

    /// Do not print a prompt before each line.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let re = Regex::new(&args.pattern).context("invalid pattern")?;
    if args.dump {
        print!("{}", re.automaton());
    }

    run(&re, io::stdin().lock(), io::stdout(), args.quiet).context("failed to run session")
}

/// Reads lines from `input` and reports on `out` whether each one matches.
///
/// Stops at end of input or at the first `quit` line; nothing after it is read.
fn run<R: BufRead, W: Write>(re: &Regex, input: R, mut out: W, quiet: bool) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        if !quiet {
            write!(out, "Enter a string that matches \"{}\" (Enter \"{}\" to quit): ", re, QUIT)?;
            out.flush()?;
        }
        let Some(line) = lines.next() else { break };
        let line = line?;
        if line == QUIT {
            break;
        }
        if re.is_match(&line) {
            writeln!(out, "\"{}\" matches!", line)?;
        } else {
            writeln!(out, "\"{}\" does not match.", line)?;
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn session(input: &str, quiet: bool) -> String {
        let re = Regex::new("((Hello)|(Hi)) Worlds*").unwrap();
        let mut out = Vec::new();
        run(&re, Cursor::new(input), &mut out, quiet).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn stops_at_quit() {
        let out = session("Hi World\nnope\nquit\nHello World\n", true);
        assert_eq!(out, "\"Hi World\" matches!\n\"nope\" does not match.\n");
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("Hello World"));
    }

    #[test]
    fn stops_at_end_of_input() {
        let out = session("Hello Worldss\nquitter", true);
        assert_eq!(out, "\"Hello Worldss\" matches!\n\"quitter\" does not match.\n");
    }

    #[test]
    fn prompts_before_each_line() {
        let prompt = "Enter a string that matches \"((Hello)|(Hi)) Worlds*\" (Enter \"quit\" to quit): ";
        let out = session("Hi World\n", false);
        assert_eq!(out, format!("{prompt}\"Hi World\" matches!\n{prompt}"));
    }

    #[test]
    fn empty_line_is_matched() {
        assert_eq!(session("\n", true), "\"\" does not match.\n");
    }
}
