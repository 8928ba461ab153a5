//! Debug-print macros.
//!
//! Each macro prefixes its output with `file:line: warning: ` so compiler
//! aware editors can jump to the call site, and does nothing when debug
//! assertions are disabled.

use std::io;
use tracing::warn;

use crate::{
    inspect::{self, Inspect},
    stream::Stream,
};

#[doc(hidden)]
#[must_use]
pub fn location(file: &str, line: u32) -> String {
    format!("{file}:{line}: warning: ")
}

#[doc(hidden)]
/// Hex dump `value` to stdout. Failures are logged, never raised: debug
/// output must not take the program down.
pub fn dump_to_stdout<T: Inspect + ?Sized>(value: &T) {
    let stdout = io::stdout();
    let mut out = Stream::new(stdout.lock());
    if let Err(e) = inspect::dump(&mut out, value) {
        warn!(error = ?e, "hex dump failed");
    }
}

/// Print an expression and its `Debug` value.
///
/// ```
/// let x = 6;
/// hd_rs::db!(x + 1); // src/main.rs:2: warning: x + 1 = 7
/// ```
#[macro_export]
macro_rules! db {
    ($value:expr) => {
        if cfg!(debug_assertions) {
            println!(
                "{}{} = {:?}",
                $crate::macros::location(file!(), line!()),
                stringify!($value),
                $value
            );
        }
    };
}

/// Print the concatenated `Display` of every argument.
///
/// ```
/// hd_rs::dbp!("hello world! ", 10, ", ", 42);
/// ```
#[macro_export]
macro_rules! dbp {
    ($($arg:expr),+ $(,)?) => {
        if cfg!(debug_assertions) {
            let mut line = $crate::macros::location(file!(), line!());
            $(
                line.push_str(&::std::string::ToString::to_string(&$arg));
            )+
            println!("{line}");
        }
    };
}

/// Print an expression followed by the hex dump of its value (and of the
/// heap buffer it links to).
///
/// ```
/// let v = vec![1, 2, 3, 4, 5];
/// hd_rs::dbh!(v);
/// ```
#[macro_export]
macro_rules! dbh {
    ($value:expr) => {
        if cfg!(debug_assertions) {
            println!(
                "{}{} =",
                $crate::macros::location(file!(), line!()),
                stringify!($value)
            );
            $crate::macros::dump_to_stdout(&$value);
        }
    };
}
