use nix::errno::Errno;
use std::{
    backtrace::{Backtrace, BacktraceStatus},
    fmt, result,
};

use crate::range::ByteRange;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Broad classification of an [`Error`].
pub enum Kind {
    /// Any failure that is not about inspected memory (sink I/O, procfs,
    /// argument handling, ...).
    Other,
    /// The requested byte range is not fully backed by readable mappings.
    Unreadable,
}

pub struct Error {
    error: String,
    kind: Kind,
    backtrace: Backtrace,
}

impl Error {
    fn new(error: String, kind: Kind) -> Self {
        Self {
            error,
            kind,
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    /// Build the error reported when `range` cannot be read from the
    /// current process.
    pub fn unreadable(range: ByteRange) -> Self {
        Self::new(format!("{}: {range}", Errno::EFAULT), Kind::Unreadable)
    }

    #[must_use]
    /// The error text, without the backtrace.
    pub fn message(&self) -> &str {
        &self.error
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn is_unreadable(&self) -> bool {
        self.kind == Kind::Unreadable
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if self.backtrace.status() == BacktraceStatus::Captured {
            write!(f, "\nBacktrace:\n{}", self.backtrace)
        } else {
            Ok(())
        }
    }
}

impl<E: fmt::Display> From<E> for Error {
    fn from(e: E) -> Error {
        Error::new(e.to_string(), Kind::Other)
    }
}

pub type Result<T> = result::Result<T, Error>;
