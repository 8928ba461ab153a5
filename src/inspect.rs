//! Categorical inspection of values.
//!
//! A value is classified into one of a closed set of [`Category`]
//! variants. The category decides which bytes belong to the value itself
//! and whether a second, linked heap buffer is dumped after it.
//!
//! The [`Inspect`] implementations are the only place where pointers are
//! looked at. They boil a value down to a [`ByteRange`] and a [`Category`]
//! made of plain integers, and [`Node::build`] works on those alone.

use core::fmt;
use serde_derive::Serialize;
use std::{ffi::CString, io::Write, marker::PhantomData, mem};
use tracing::{trace, warn};

use crate::{
    diag::Result,
    dump::dump_bytes,
    mapped::Mapped,
    memory,
    range::ByteRange,
    sbo::SmallString,
    stream::Stream,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What kind of value is being inspected, with the facts needed to find
/// its linked storage.
pub enum Category {
    /// Self-contained value: its own bytes are all there is.
    Trivial,
    /// Explicit address + length, shown as is.
    Buffer,
    /// Growable sequence header. `data` is 0 when no storage is allocated.
    Sequence {
        data: usize,
        capacity: usize,
        element: usize,
    },
    /// Non-owning view over `length` bytes at `data`.
    View { data: usize, length: usize },
    /// Owning string-like object. `terminator` is the number of bytes past
    /// `capacity` that the type guarantees to be readable (1 for NUL
    /// terminated strings, 0 otherwise).
    Owning {
        data: usize,
        capacity: usize,
        terminator: usize,
    },
}

/// Classification of a type for inspection.
pub trait Inspect {
    fn category(&self) -> Category;

    /// Bytes belonging to the value itself. Defaults to the object's own
    /// storage.
    fn range(&self) -> ByteRange {
        ByteRange::of(self)
    }
}

macro_rules! impl_trivial {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Inspect for $ty {
                fn category(&self) -> Category {
                    Category::Trivial
                }
            }
        )*
    };
}

impl_trivial!(
    bool, char, f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
);

impl<T, const N: usize> Inspect for [T; N] {
    fn category(&self) -> Category {
        Category::Trivial
    }
}

impl Inspect for ByteRange {
    fn category(&self) -> Category {
        Category::Buffer
    }

    fn range(&self) -> ByteRange {
        *self
    }
}

impl Inspect for Mapped {
    fn category(&self) -> Category {
        Category::Buffer
    }

    fn range(&self) -> ByteRange {
        Mapped::range(self)
    }
}

impl<T> Inspect for Vec<T> {
    fn category(&self) -> Category {
        let element = mem::size_of::<T>();
        // An unallocated vector holds a dangling pointer; report it as null.
        let data = if self.capacity() == 0 || element == 0 {
            0
        } else {
            self.as_ptr() as usize
        };

        Category::Sequence {
            data,
            capacity: self.capacity(),
            element,
        }
    }
}

impl Inspect for &str {
    fn category(&self) -> Category {
        Category::View {
            data: self.as_ptr() as usize,
            length: self.len(),
        }
    }
}

impl<T> Inspect for &[T] {
    fn category(&self) -> Category {
        Category::View {
            data: self.as_ptr() as usize,
            length: mem::size_of_val(*self),
        }
    }
}

impl Inspect for String {
    fn category(&self) -> Category {
        Category::Owning {
            data: self.as_ptr() as usize,
            capacity: self.capacity(),
            terminator: 0,
        }
    }
}

impl Inspect for CString {
    fn category(&self) -> Category {
        Category::Owning {
            data: self.as_ptr() as usize,
            capacity: self.as_bytes().len(),
            terminator: 1,
        }
    }
}

impl Inspect for SmallString {
    fn category(&self) -> Category {
        Category::Owning {
            data: self.as_ptr() as usize,
            capacity: self.capacity(),
            terminator: 1,
        }
    }
}

#[derive(Debug, Serialize)]
/// One inspected range, optionally followed by the heap buffer it links
/// to.
pub struct Node {
    label: &'static str,
    #[serde(flatten)]
    range: ByteRange,
    child: Option<Box<Node>>,
}

impl Node {
    #[must_use]
    pub fn new<T: Inspect + ?Sized>(value: &T) -> Self {
        Self::build(value.range(), value.category())
    }

    #[must_use]
    /// Inspect any value as a trivial one: only its own bytes.
    pub fn trivial<T: ?Sized>(value: &T) -> Self {
        Self::build(ByteRange::of(value), Category::Trivial)
    }

    #[must_use]
    pub fn buffer(range: ByteRange) -> Self {
        Self::build(range, Category::Buffer)
    }

    #[must_use]
    /// Build the node for a value occupying `range` and classified as
    /// `category`.
    pub fn build(range: ByteRange, category: Category) -> Self {
        let (label, child) = match category {
            Category::Trivial => ("value", None),
            Category::Buffer => ("buffer", None),
            Category::Sequence {
                data,
                capacity,
                element,
            } => ("vector", Self::heap_vector(data, capacity, element)),
            // Exactly the logical length: the byte after a view is not ours.
            Category::View { data, length } => {
                ("view", Some(Self::leaf("view data", ByteRange::new(data, length))))
            }
            Category::Owning {
                data,
                capacity,
                terminator,
            } => ("string", Self::heap_string(range, data, capacity, terminator)),
        };

        Self {
            label,
            range,
            child: child.map(Box::new),
        }
    }

    fn leaf(label: &'static str, range: ByteRange) -> Self {
        Self {
            label,
            range,
            child: None,
        }
    }

    fn heap_vector(data: usize, capacity: usize, element: usize) -> Option<Self> {
        if data == 0 {
            trace!("vector has no backing storage");
            return None;
        }

        Some(Self::leaf(
            "heap vector",
            ByteRange::new(data, capacity.saturating_mul(element)),
        ))
    }

    fn heap_string(
        range: ByteRange,
        data: usize,
        capacity: usize,
        terminator: usize,
    ) -> Option<Self> {
        if range.contains(data) {
            trace!(
                data = format_args!("{data:#x}"),
                "payload is inline (small-buffer optimization)"
            );
            return None;
        }

        let extent = capacity.saturating_add(terminator);
        if data == 0 || extent == 0 {
            trace!("string has no heap payload");
            return None;
        }

        trace!(
            data = format_args!("{data:#x}"),
            extent,
            "payload is heap resident"
        );
        Some(Self::leaf("heap string", ByteRange::new(data, extent)))
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    #[must_use]
    pub fn range(&self) -> ByteRange {
        self.range
    }

    #[must_use]
    pub fn child(&self) -> Option<&Node> {
        self.child.as_deref()
    }

    /// Dump the node's own bytes, then those of its linked buffer under a
    /// `<label>:` header line.
    ///
    /// Every range of the chain is validated and copied before anything is
    /// written, so an unreadable child produces no partial output. Empty
    /// ranges, including an empty linked buffer and its header, produce no
    /// output at all.
    ///
    /// # Errors
    ///
    /// Returns an unreadable-range error if any range cannot be read, or
    /// the sink's error when writing fails.
    pub fn dump<W: Write>(&self, out: &mut Stream<W>) -> Result<()> {
        let mut snapshots = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            snapshots.push((current, memory::snapshot(current.range)?));
            node = current.child();
        }

        for (depth, (node, bytes)) in snapshots.iter().enumerate() {
            if bytes.is_empty() {
                continue;
            }
            if depth > 0 {
                writeln!(out, "{}:", node.label)?;
            }
            dump_bytes(out, node.range.address(), bytes)?;
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Display adapter dumping a borrowed value. See [`hd`].
pub struct Hd<'a> {
    node: Node,
    _value: PhantomData<&'a ()>,
}

#[must_use]
/// Prepare a hex dump of `value` and the heap buffer it links to.
///
/// The value stays borrowed until the adapter is dropped, so it cannot move
/// or be freed while it is being printed.
///
/// ```
/// let v = vec![1u16, 2, 3];
/// let text = hd_rs::hd(&v).to_string();
/// assert!(text.contains("heap vector:"));
/// ```
pub fn hd<T: Inspect + ?Sized>(value: &T) -> Hd<'_> {
    Hd {
        node: Node::new(value),
        _value: PhantomData,
    }
}

impl Hd<'_> {
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl fmt::Display for Hd<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stream = Stream::new(Vec::new());
        // A failed dump is shown as text: printing a value must not panic.
        if let Err(e) = self.node.dump(&mut stream) {
            warn!(error = e.message(), "hex dump failed");
            return writeln!(f, "{}", e.message());
        }
        f.write_str(&String::from_utf8_lossy(stream.get_ref()))
    }
}

/// Dump `value` and its linked heap buffer to `out`.
///
/// # Errors
///
/// See [`Node::dump`].
pub fn dump<W: Write, T: Inspect + ?Sized>(out: &mut Stream<W>, value: &T) -> Result<()> {
    Node::new(value).dump(out)
}
