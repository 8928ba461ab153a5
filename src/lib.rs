#![allow(clippy::multiple_crate_versions)]

//! hd-rs: address-aligned hex dumps of values in the current process.
//!
//! The dump engine renders any byte range as lines of 16 bytes, each line
//! starting on a 16-byte aligned address so dumps of related objects can be
//! compared column by column. On top of it, the inspector classifies a value
//! (plain value, explicit buffer, vector, borrowed view, owning string) and
//! also dumps the heap buffer the value links to, if any.
//!
//! Every range is checked against the process mappings before it is read:
//! a bad range is reported as an error instead of crashing the process.
//!
//! See `bin/hd.rs` for a small command-line front-end dumping files.

pub mod align;
pub mod bench;
pub mod diag;
pub mod dump;
pub mod input;
pub mod inspect;
pub mod join;
pub mod macros;
pub mod mapped;
pub mod memory;
pub mod range;
pub mod render;
pub mod sbo;
pub mod stream;

pub use inspect::{dump, hd, Category, Hd, Inspect, Node};
pub use range::ByteRange;
