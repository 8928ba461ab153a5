//! Mapping of a byte range onto fixed-width display lines.
//!
//! Every dump starts on a line-width-aligned address, so two dumps of
//! related objects line up column by column. The leading slots of the first
//! line and the trailing slots of the last line are placeholders.

/// Number of bytes shown on one display line.
pub const LINE_WIDTH: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The aligned display window of a non-empty byte range.
pub struct Window {
    start: usize,
    pre: usize,
    length: usize,
}

impl Window {
    #[must_use]
    /// Compute the window for `length` bytes at `address`.
    ///
    /// # Returns
    ///
    /// `None` for a null address, a zero length, or a range whose last
    /// line would run past the end of the address space. Such ranges
    /// produce no lines at all, so a range within the last 16 bytes of the
    /// address space cannot be displayed; on Linux those addresses belong
    /// to the kernel and are never readable anyway.
    pub fn new(address: usize, length: usize) -> Option<Self> {
        if address == 0 || length == 0 {
            return None;
        }

        let pre = address % LINE_WIDTH;
        let start = address - pre;
        pre.checked_add(length)?
            .checked_next_multiple_of(LINE_WIDTH)?
            .checked_add(start)?;

        Some(Self { start, pre, length })
    }

    #[must_use]
    /// Address of the first rendered line; always a multiple of
    /// [`LINE_WIDTH`].
    pub fn start(&self) -> usize {
        self.start
    }

    #[must_use]
    /// Placeholder slots in front of the first real byte.
    pub fn pre(&self) -> usize {
        self.pre
    }

    #[must_use]
    /// Placeholder slots after the last real byte.
    pub fn post(&self) -> usize {
        (LINE_WIDTH - (self.pre + self.length) % LINE_WIDTH) % LINE_WIDTH
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        (self.pre + self.length).div_ceil(LINE_WIDTH)
    }

    #[must_use]
    pub fn lines(&self) -> Lines {
        Lines {
            window: *self,
            address: self.start,
            consumed: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Layout of one display line: `pre + body + post == LINE_WIDTH`.
pub struct Line {
    /// Aligned address of the line's first slot.
    pub address: usize,
    /// Offset of the line's first real byte within the dumped range.
    pub offset: usize,
    pub pre: usize,
    pub body: usize,
    pub post: usize,
}

/// Iterator over the lines of a [`Window`], in ascending address order.
pub struct Lines {
    window: Window,
    address: usize,
    consumed: usize,
}

impl Iterator for Lines {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        let remaining = self.window.length - self.consumed;
        if remaining == 0 {
            return None;
        }

        let pre = if self.consumed == 0 { self.window.pre } else { 0 };
        let body = remaining.min(LINE_WIDTH - pre);
        let line = Line {
            address: self.address,
            offset: self.consumed,
            pre,
            body,
            post: LINE_WIDTH - pre - body,
        };

        self.consumed += body;
        self.address += LINE_WIDTH;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_empty() {
        assert!(Window::new(0, 10).is_none());
        assert!(Window::new(0x1000, 0).is_none());
    }

    #[test]
    fn test_window_overflow() {
        assert!(Window::new(usize::MAX - 4, 3).is_none());
    }

    #[test]
    fn test_window_last_line_of_address_space() {
        // The range itself does not wrap, its aligned line would.
        assert!(Window::new(usize::MAX - 10, 2).is_none());
        assert!(Window::new(usize::MAX - 31, 16).is_some());
    }

    #[test]
    fn test_window_aligned_start() {
        for address in 0x1000..0x1020 {
            let window = Window::new(address, 5).expect("window");
            assert_eq!(window.start() % LINE_WIDTH, 0);
            assert_eq!(window.start() + window.pre(), address);
        }
    }

    #[test]
    fn test_window_line_count() {
        for address in 0x2000..0x2010 {
            for length in 1..50 {
                let window = Window::new(address, length).expect("window");
                let pre = address % LINE_WIDTH;
                assert_eq!(
                    window.line_count(),
                    (pre + length + LINE_WIDTH - 1) / LINE_WIDTH
                );
                assert_eq!(window.lines().count(), window.line_count());
            }
        }
    }

    #[test]
    fn test_lines_cover_every_byte_once() {
        for address in 0x3000..0x3010 {
            for length in 1..40 {
                let window = Window::new(address, length).expect("window");
                let lines: Vec<Line> = window.lines().collect();

                let mut expected_offset = 0;
                for (i, line) in lines.iter().enumerate() {
                    assert_eq!(line.pre + line.body + line.post, LINE_WIDTH);
                    assert_eq!(line.offset, expected_offset);
                    assert_eq!(line.address, window.start() + i * LINE_WIDTH);
                    if i > 0 {
                        assert_eq!(line.pre, 0);
                    }
                    if i + 1 < lines.len() {
                        assert_eq!(line.post, 0);
                    }
                    expected_offset += line.body;
                }
                assert_eq!(expected_offset, length);
                assert_eq!(lines[0].pre, address % LINE_WIDTH);
                assert_eq!(lines[lines.len() - 1].post, window.post());
            }
        }
    }

    #[test]
    fn test_single_short_line() {
        let window = Window::new(0x1003, 4).expect("window");
        let lines: Vec<Line> = window.lines().collect();
        assert_eq!(
            lines,
            vec![Line {
                address: 0x1000,
                offset: 0,
                pre: 3,
                body: 4,
                post: 9,
            }]
        );
    }

    #[test]
    fn test_post_formula() {
        let window = Window::new(0x1000, 32).expect("window");
        assert_eq!(window.post(), 0);
        let window = Window::new(0x100e, 3).expect("window");
        assert_eq!(window.post(), 15);
        assert_eq!(window.line_count(), 2);
    }
}
