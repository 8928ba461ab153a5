use procfs::process::{MMPermissions, Process};
use std::{fs::File, os::unix::fs::FileExt};
use tracing::warn;

use crate::{
    diag::{Error, Result},
    range::ByteRange,
};

const SELF_MEM: &str = "/proc/self/mem";

/// Whether `[start, end)` is covered, without holes, by the sorted
/// `regions` (each a half-open `(start, end)` pair).
#[must_use]
pub fn covered(regions: &[(u64, u64)], start: u64, end: u64) -> bool {
    let mut cursor = start;
    for &(lo, hi) in regions {
        if lo <= cursor && cursor < hi {
            cursor = hi;
        }
        if cursor >= end {
            return true;
        }
    }

    false
}

fn readable_regions() -> Result<Vec<(u64, u64)>> {
    let maps = Process::myself()?.maps()?;
    Ok(maps
        .into_iter()
        .filter(|map| map.perms.contains(MMPermissions::READ))
        .map(|map| map.address)
        .collect())
}

/// Check that every byte of `range` belongs to a readable mapping of the
/// current process. An empty range is trivially readable.
///
/// # Errors
///
/// Returns an error if `/proc/self/maps` cannot be read or parsed.
pub fn is_readable(range: ByteRange) -> Result<bool> {
    if range.is_empty() {
        return Ok(true);
    }

    match range.end() {
        Some(end) => Ok(covered(
            &readable_regions()?,
            range.address() as u64,
            end as u64,
        )),
        None => Ok(false),
    }
}

/// Copy the bytes of `range` out of the current process.
///
/// The range is validated against the process mappings first and copied
/// through `/proc/self/mem`, so an invalid range is reported instead of
/// faulting, and uninitialized bytes (padding, spare capacity) are read as
/// plain data.
///
/// # Errors
///
/// Returns [`Error::unreadable`] when the range is not fully readable, or an
/// error if procfs cannot be queried.
pub fn snapshot(range: ByteRange) -> Result<Vec<u8>> {
    if range.is_empty() {
        return Ok(Vec::new());
    }

    if !is_readable(range)? {
        warn!(%range, "range is not backed by readable mappings");
        return Err(Error::unreadable(range));
    }

    let mem = File::open(SELF_MEM)?;
    let mut buf = vec![0u8; range.length()];
    mem.read_exact_at(&mut buf, range.address() as u64)
        .map_err(|e| {
            warn!(%range, error = %e, "reading {SELF_MEM} failed");
            Error::unreadable(range)
        })?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covered_single_region() {
        let regions = [(0x1000, 0x2000)];
        assert!(covered(&regions, 0x1000, 0x2000));
        assert!(covered(&regions, 0x1800, 0x1801));
        assert!(!covered(&regions, 0xfff, 0x1001));
        assert!(!covered(&regions, 0x1fff, 0x2001));
    }

    #[test]
    fn test_covered_adjacent_regions() {
        let regions = [(0x1000, 0x2000), (0x2000, 0x3000), (0x4000, 0x5000)];
        assert!(covered(&regions, 0x1ff0, 0x2010));
        assert!(!covered(&regions, 0x2ff0, 0x4010));
        assert!(covered(&regions, 0x4000, 0x4010));
    }

    #[test]
    fn test_snapshot_stack_value() {
        let value: [u8; 6] = *b"hello!";
        let bytes = snapshot(ByteRange::of(&value)).expect("snapshot");
        assert_eq!(bytes, b"hello!");
    }

    #[test]
    fn test_snapshot_heap_spare_capacity() {
        let mut v: Vec<u8> = Vec::with_capacity(64);
        v.extend_from_slice(b"abc");
        let range = ByteRange::new(v.as_ptr() as usize, v.capacity());
        let bytes = snapshot(range).expect("snapshot");
        assert_eq!(bytes.len(), v.capacity());
        assert_eq!(&bytes[..3], b"abc");
    }

    #[test]
    fn test_snapshot_empty() {
        assert!(snapshot(ByteRange::new(0, 8)).expect("snapshot").is_empty());
        assert!(is_readable(ByteRange::new(0, 8)).expect("readable"));
    }

    #[test]
    fn test_snapshot_unmapped() {
        let err = snapshot(ByteRange::new(0x10, 4)).unwrap_err();
        assert!(err.is_unreadable());
        assert!(!is_readable(ByteRange::new(0x10, 4)).expect("readable"));
    }

    #[test]
    fn test_snapshot_wrapping_range() {
        let err = snapshot(ByteRange::new(usize::MAX - 1, 8)).unwrap_err();
        assert!(err.is_unreadable());
    }
}
