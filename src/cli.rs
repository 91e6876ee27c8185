//! Command line of the `membrane_fdm` binary.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::Parser;

/// Damped wave propagation on a small square membrane
#[derive(Parser, Debug)]
#[command(name = "membrane_fdm", version, long_about = None)]
pub struct Args {
    /// Number of time steps to run
    #[arg(allow_hyphen_values = true)]
    pub iterations: OsString,
}

/// What the binary does with its command line.
#[derive(Debug)]
pub enum Invocation {
    /// Run this many steps.
    Run(u64),
    /// `--help` or `--version`, to be printed by clap.
    Info(clap::Error),
    /// Wrong number of arguments.
    Usage,
}

/// Interprets the full command line, program name included.
///
/// Only the argument count can make it fail. Any single argument is a count, even one clap
/// would otherwise read as a flag or an escape.
pub fn interpret<I, T>(argv: I) -> Invocation
    where I: IntoIterator<Item = T>,
          T: Into<OsString> + Clone
{
    let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
    match Args::try_parse_from(&argv) {
        Ok(args) => Invocation::Run(parse_iterations(&args.iterations.to_string_lossy())),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(err)
        }
        Err(_) if argv.len() == 2 => Invocation::Run(parse_iterations(&argv[1].to_string_lossy())),
        Err(_) => Invocation::Usage,
    }
}

/// Reads an iteration count the way C's `atoi` would, clamped at zero.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first non-digit. Input
/// without leading digits yields 0, negative counts yield 0 and overflow saturates.
pub fn parse_iterations(arg: &str) -> u64 {
    let s = arg.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let value = digits.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d - b'0')));
    if negative { 0 } else { value }
}

/// Message printed when the binary is called with the wrong number of arguments.
pub fn usage(program: &str) -> String {
    format!("RuntimeError: Wrong inputs\nCorrect Format: {} <number of iterations>\n", program)
}
