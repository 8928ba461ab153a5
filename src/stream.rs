use std::{
    io::{self, Write},
    ops::{Deref, DerefMut},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Numeric base used by [`Stream::num`].
pub enum Radix {
    /// Base 10.
    Decimal,
    /// Base 16, lowercase digits.
    Hexadecimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Formatting state carried by a [`Stream`].
///
/// `width` is a minimum field width; shorter output is right-justified and
/// padded on the left with `fill`. `prefix` adds `0x` in front of
/// hexadecimal numbers (counted in the width).
pub struct Style {
    pub fill: char,
    pub radix: Radix,
    pub width: usize,
    pub prefix: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: ' ',
            radix: Radix::Decimal,
            width: 0,
            prefix: false,
        }
    }
}

/// An output sink plus the ambient formatting state numbers are written
/// with.
pub struct Stream<W: Write> {
    inner: W,
    style: Style,
}

impl<W: Write> Stream<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn style(&self) -> Style {
        self.style
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// Snapshot the current style. The style is put back when the returned
    /// guard is dropped, whatever happened to the stream in between.
    pub fn guard(&mut self) -> Guard<'_, W> {
        let saved = self.style;
        Guard {
            stream: self,
            saved,
        }
    }

    /// Write `value` according to the current style.
    ///
    /// # Errors
    ///
    /// Returns the underlying writer's error unchanged.
    pub fn num(&mut self, value: u64) -> io::Result<()> {
        let digits = match (self.style.radix, self.style.prefix) {
            (Radix::Decimal, _) => value.to_string(),
            (Radix::Hexadecimal, false) => format!("{value:x}"),
            (Radix::Hexadecimal, true) => format!("{value:#x}"),
        };

        for _ in digits.len()..self.style.width {
            write!(self.inner, "{}", self.style.fill)?;
        }
        self.inner.write_all(digits.as_bytes())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for Stream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Scoped formatting-state guard returned by [`Stream::guard`].
pub struct Guard<'a, W: Write> {
    stream: &'a mut Stream<W>,
    saved: Style,
}

impl<W: Write> Deref for Guard<'_, W> {
    type Target = Stream<W>;

    fn deref(&self) -> &Stream<W> {
        self.stream
    }
}

impl<W: Write> DerefMut for Guard<'_, W> {
    fn deref_mut(&mut self) -> &mut Stream<W> {
        self.stream
    }
}

impl<W: Write> Drop for Guard<'_, W> {
    fn drop(&mut self) {
        self.stream.style = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(stream: Stream<Vec<u8>>) -> String {
        String::from_utf8(stream.into_inner()).expect("utf8")
    }

    #[test]
    fn test_num_default_style() {
        let mut stream = Stream::new(Vec::new());
        stream.num(42).expect("num");
        assert_eq!(text(stream), "42");
    }

    #[test]
    fn test_num_hex_fill_width() {
        let mut stream = Stream::new(Vec::new());
        stream.set_style(Style {
            fill: '0',
            radix: Radix::Hexadecimal,
            width: 2,
            prefix: false,
        });
        stream.num(0xa).expect("num");
        stream.num(0xff).expect("num");
        stream.num(0x123).expect("num");
        assert_eq!(text(stream), "0aff123");
    }

    #[test]
    fn test_num_prefixed_right_justified() {
        let mut stream = Stream::new(Vec::new());
        stream.set_style(Style {
            fill: ' ',
            radix: Radix::Hexadecimal,
            width: 8,
            prefix: true,
        });
        stream.num(0x1f).expect("num");
        assert_eq!(text(stream), "    0x1f");
    }

    #[test]
    fn test_guard_restores_style() {
        let mut stream = Stream::new(Vec::new());
        let before = stream.style();
        {
            let mut guard = stream.guard();
            guard.set_style(Style {
                fill: '*',
                radix: Radix::Hexadecimal,
                width: 4,
                prefix: false,
            });
            guard.num(1).expect("num");
        }
        assert_eq!(stream.style(), before);
        stream.num(7).expect("num");
        assert_eq!(text(stream), "***17");
    }

    #[test]
    fn test_guard_restores_on_early_exit() {
        fn failing(stream: &mut Stream<Vec<u8>>) -> io::Result<()> {
            let mut guard = stream.guard();
            guard.set_style(Style {
                fill: '0',
                radix: Radix::Hexadecimal,
                width: 2,
                prefix: false,
            });
            Err(io::Error::new(io::ErrorKind::Other, "sink gone"))
        }

        let mut stream = Stream::new(Vec::new());
        assert!(failing(&mut stream).is_err());
        assert_eq!(stream.style(), Style::default());
    }
}
