use std::io::Write;
use tracing::debug;

use crate::{
    align::Window,
    diag::Result,
    memory,
    range::ByteRange,
    render,
    stream::Stream,
};

/// Hex dump of the bytes of `range` in the current process.
///
/// An empty range (null address or zero length) writes nothing. Otherwise
/// the range is validated and copied once, then rendered line by line
/// starting at the closest lower line-aligned address.
///
/// # Errors
///
/// Returns an unreadable-range error (see [`crate::diag::Error::unreadable`])
/// when `range` is not fully mapped and readable, or the sink's error when
/// writing fails.
pub fn hex_dump<W: Write>(out: &mut Stream<W>, range: ByteRange) -> Result<()> {
    if range.is_empty() {
        return Ok(());
    }

    let bytes = memory::snapshot(range)?;
    dump_bytes(out, range.address(), &bytes)
}

/// Hex dump of `bytes`, displayed as if they were located at `address`.
///
/// The output is identical to what [`hex_dump`] prints for the same bytes
/// at the same address. The stream's formatting style is captured before
/// the first line and restored after the last one, also when a write
/// fails.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn dump_bytes<W: Write>(out: &mut Stream<W>, address: usize, bytes: &[u8]) -> Result<()> {
    let Some(window) = Window::new(address, bytes.len()) else {
        return Ok(());
    };

    debug!(
        address = format_args!("{address:#x}"),
        length = bytes.len(),
        start = format_args!("{:#x}", window.start()),
        pre = window.pre(),
        post = window.post(),
        lines = window.line_count(),
        "dumping"
    );

    let mut guard = out.guard();
    for line in window.lines() {
        let body = &bytes[line.offset..line.offset + line.body];
        render::line(&mut *guard, &line, body)?;
    }

    Ok(())
}
