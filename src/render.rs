use std::io::{self, Write};

use crate::{
    align::{Line, LINE_WIDTH},
    stream::{Radix, Stream, Style},
};

/// Width of the right-justified address column.
pub const ADDRESS_WIDTH: usize = 19;

/// Hex column token of a slot that has no real byte behind it.
pub const PLACEHOLDER: &str = "-- ";

const ADDRESS_STYLE: Style = Style {
    fill: ' ',
    radix: Radix::Hexadecimal,
    width: ADDRESS_WIDTH,
    prefix: true,
};

const BYTE_STYLE: Style = Style {
    fill: '0',
    radix: Radix::Hexadecimal,
    width: 2,
    prefix: false,
};

#[must_use]
/// ASCII column representation of `byte`: the character itself when it is
/// printable ASCII (space included), `.` otherwise.
pub fn printable(byte: u8) -> char {
    if byte == b' ' || byte.is_ascii_graphic() {
        char::from(byte)
    } else {
        '.'
    }
}

/// Render one display line.
///
/// The stream style is overwritten; callers hold a [`Stream::guard`] across
/// the whole dump so the caller's style comes back afterwards.
///
/// # Arguments
///
/// * `out` - Destination stream.
/// * `line` - Layout of the line (address and slot counts).
/// * `bytes` - The `line.body` real bytes shown on this line.
///
/// # Errors
///
/// Returns the sink's error unchanged.
pub fn line<W: Write>(out: &mut Stream<W>, line: &Line, bytes: &[u8]) -> io::Result<()> {
    debug_assert_eq!(bytes.len(), line.body);
    debug_assert_eq!(line.pre + line.body + line.post, LINE_WIDTH);

    out.set_style(ADDRESS_STYLE);
    out.num(line.address as u64)?;
    out.write_all(b": ")?;

    out.set_style(BYTE_STYLE);
    for _ in 0..line.pre {
        out.write_all(PLACEHOLDER.as_bytes())?;
    }
    for &byte in bytes {
        out.num(u64::from(byte))?;
        out.write_all(b" ")?;
    }
    for _ in 0..line.post {
        out.write_all(PLACEHOLDER.as_bytes())?;
    }

    let ascii: String = std::iter::repeat_n('.', line.pre)
        .chain(bytes.iter().copied().map(printable))
        .chain(std::iter::repeat_n('.', line.post))
        .collect();
    writeln!(out, " | {ascii}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(layout: &Line, bytes: &[u8]) -> String {
        let mut stream = Stream::new(Vec::new());
        line(&mut stream, layout, bytes).expect("render");
        String::from_utf8(stream.into_inner()).expect("utf8")
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable(b'a'), 'a');
        assert_eq!(printable(b' '), ' ');
        assert_eq!(printable(b'~'), '~');
        assert_eq!(printable(0x00), '.');
        assert_eq!(printable(b'\n'), '.');
        assert_eq!(printable(0x7f), '.');
        assert_eq!(printable(0xe9), '.');
    }

    #[test]
    fn test_full_line() {
        let bytes: Vec<u8> = (b'A'..b'A' + 16).collect();
        let layout = Line {
            address: 0x1000,
            offset: 0,
            pre: 0,
            body: 16,
            post: 0,
        };
        assert_eq!(
            render(&layout, &bytes),
            "             0x1000: 41 42 43 44 45 46 47 48 49 4a 4b 4c 4d 4e 4f 50  | ABCDEFGHIJKLMNOP\n"
        );
    }

    #[test]
    fn test_partial_line_placeholders() {
        let layout = Line {
            address: 0x2000,
            offset: 0,
            pre: 2,
            body: 3,
            post: 11,
        };
        let out = render(&layout, &[b'h', 0x00, b'i']);
        assert_eq!(
            out,
            format!(
                "{:>19}: -- -- 68 00 69 {} | ..h.i{}\n",
                "0x2000",
                "-- ".repeat(11),
                ".".repeat(11)
            )
        );
    }

    #[test]
    fn test_constant_width() {
        let full = render(
            &Line {
                address: 0x10,
                offset: 0,
                pre: 0,
                body: 16,
                post: 0,
            },
            &[0xff; 16],
        );
        let partial = render(
            &Line {
                address: 0x7fff_ffff_fff0,
                offset: 0,
                pre: 5,
                body: 1,
                post: 10,
            },
            &[0x20],
        );
        assert_eq!(full.len(), partial.len());
        assert_eq!(full.find(':'), partial.find(':'));
        assert_eq!(full.find('|'), partial.find('|'));
    }
}
