use memmap2::Mmap;
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    diag::{Error, Result},
    range::ByteRange,
};

/// Read-only memory mapping of a whole file.
///
/// The mapped bytes form one stable contiguous range for the lifetime of
/// the value, which makes them a natural explicit buffer to dump. An empty
/// file is not mapped at all and exposes an empty range.
pub struct Mapped {
    map: Option<Mmap>,
    path: PathBuf,
}

impl Mapped {
    /// Map the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, stat'ed or mapped.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let context = |e: std::io::Error| Error::from(format!("{}: {e}", path.display()));

        let file = File::open(&path).map_err(context)?;
        let len = file.metadata().map_err(context)?.len();
        let map = if len == 0 {
            None
        } else {
            // The mapping is private and read-only; truncating the file
            // underneath it is the caller's problem.
            Some(unsafe { Mmap::map(&file) }.map_err(context)?)
        };

        debug!(path = %path.display(), len, "mapped file");
        Ok(Self { map, path })
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn range(&self) -> ByteRange {
        ByteRange::from_slice(self.bytes())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
