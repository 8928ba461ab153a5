use core::fmt;

const INLINE: usize = 15;

#[derive(Clone)]
enum Repr {
    // `buf[len]` is always NUL.
    Inline { len: usize, buf: [u8; INLINE + 1] },
    // Content followed by one NUL byte.
    Heap(Vec<u8>),
}

#[derive(Clone)]
/// Owning UTF-8 string with a small-buffer optimization.
///
/// Up to [`SmallString::INLINE_CAPACITY`] bytes are stored inside the
/// object itself; longer content, or content for which more capacity was
/// reserved, lives in a heap allocation. In both representations the byte
/// following the content is a NUL terminator, so `capacity() + 1` bytes
/// starting at [`SmallString::as_ptr`] are always valid to read.
pub struct SmallString {
    repr: Repr,
}

impl SmallString {
    /// Largest content length stored inline.
    pub const INLINE_CAPACITY: usize = INLINE;

    #[must_use]
    pub fn new() -> Self {
        Self {
            repr: Repr::Inline {
                len: 0,
                buf: [0; INLINE + 1],
            },
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.repr {
            Repr::Inline { len, buf } => &buf[..*len],
            Repr::Heap(bytes) => &bytes[..bytes.len() - 1],
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Content is only ever appended from `&str`.
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    /// Content bytes that fit without reallocating, terminator excluded.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Inline { .. } => INLINE,
            Repr::Heap(bytes) => bytes.capacity() - 1,
        }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool {
        matches!(self.repr, Repr::Inline { .. })
    }

    #[must_use]
    /// Pointer to the first content byte, inside `self` when inline.
    pub fn as_ptr(&self) -> *const u8 {
        match &self.repr {
            Repr::Inline { buf, .. } => buf.as_ptr(),
            Repr::Heap(bytes) => bytes.as_ptr(),
        }
    }

    /// Make room for at least `additional` more bytes. Once on the heap, a
    /// string stays there.
    pub fn reserve(&mut self, additional: usize) {
        let needed = self.len() + additional;
        if needed <= self.capacity() {
            return;
        }

        if let Repr::Heap(bytes) = &mut self.repr {
            bytes.reserve_exact(needed + 1 - bytes.len());
            return;
        }

        let mut bytes = Vec::with_capacity(needed + 1);
        bytes.extend_from_slice(self.as_bytes());
        bytes.push(0);
        self.repr = Repr::Heap(bytes);
    }

    pub fn push_str(&mut self, s: &str) {
        self.reserve(s.len());
        match &mut self.repr {
            Repr::Inline { len, buf } => {
                let end = *len + s.len();
                buf[*len..end].copy_from_slice(s.as_bytes());
                buf[end] = 0;
                *len = end;
            }
            Repr::Heap(bytes) => {
                bytes.pop();
                bytes.extend_from_slice(s.as_bytes());
                bytes.push(0);
            }
        }
    }
}

impl Default for SmallString {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for SmallString {
    fn from(s: &str) -> Self {
        let mut ret = Self::new();
        ret.push_str(s);
        ret
    }
}

impl PartialEq for SmallString {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for SmallString {}

impl fmt::Debug for SmallString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for SmallString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
