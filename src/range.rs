use core::fmt;
use serde_derive::Serialize;
use std::{mem, ptr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// A non-owning `(address, length)` pair denoting memory to inspect.
///
/// This is the only currency the dump engine deals in: pointers are turned
/// into a `ByteRange` by [`ByteRange::of`] / [`ByteRange::from_slice`] and
/// everything downstream works on the two integers. A null address or a
/// zero length denotes an empty range.
pub struct ByteRange {
    address: usize,
    length: usize,
}

impl ByteRange {
    #[must_use]
    pub const fn new(address: usize, length: usize) -> Self {
        Self { address, length }
    }

    #[must_use]
    /// Range covering the bytes of `value` itself (its address and
    /// `size_of_val`), not anything it points to.
    pub fn of<T: ?Sized>(value: &T) -> Self {
        Self::new(
            ptr::from_ref(value).cast::<u8>() as usize,
            mem::size_of_val(value),
        )
    }

    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::new(bytes.as_ptr() as usize, bytes.len())
    }

    #[must_use]
    pub fn address(&self) -> usize {
        self.address
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.address == 0 || self.length == 0
    }

    #[must_use]
    /// One past the last byte, or `None` when the range wraps the address
    /// space.
    pub fn end(&self) -> Option<usize> {
        self.address.checked_add(self.length)
    }

    #[must_use]
    /// Whether `addr` lies in `[address, address + length)`.
    pub fn contains(&self, addr: usize) -> bool {
        addr >= self.address && addr - self.address < self.length
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x} ({} bytes)", self.address, self.length)
    }
}
