use nix::errno::Errno;
use std::{env, path::PathBuf};

use crate::diag::{Error, Result};

const JSON_FLAG: &str = "--json";

#[derive(Debug, PartialEq, Eq)]
/// Command line of the `hd-rs` binary.
pub struct Args {
    /// File to map and dump.
    pub path: PathBuf,
    /// Print the inspection node as JSON instead of dumping bytes.
    pub json: bool,
}

/// Parse a full command line, program name included.
///
/// # Errors
///
/// Prints the usage line on stderr and returns `EINVAL` when the command
/// line does not name exactly one file (optionally with `--json`).
pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut args = args.into_iter();
    let this = args.next().ok_or_else(|| Error::from(Errno::EINVAL))?;
    let rest: Vec<String> = args.collect();

    match rest.as_slice() {
        [path] if path != JSON_FLAG => Ok(Args {
            path: PathBuf::from(path),
            json: false,
        }),
        [path, flag] | [flag, path] if flag == JSON_FLAG && path != JSON_FLAG => Ok(Args {
            path: PathBuf::from(path),
            json: true,
        }),
        _ => {
            eprintln!("Usage: {this} file [{JSON_FLAG}]");
            Err(Error::from(Errno::EINVAL))
        }
    }
}

/// # Errors
///
/// Will return `Err` if the process command line is invalid, see [`parse`].
pub fn args() -> Result<Args> {
    parse(env::args())
}
