//! Reader-based record stream.
//!
//! _Requires Cargo feature `std`._

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    vec::Vec,
};

use tracing::{debug, trace, warn};

use crate::sans::{MAX_RECORD_LENGTH, RECORD_TERMINATOR};

use super::{Error, NextRaw};

/// Records framed from a buffered reader.
///
/// Each read stops at a record terminator or after `limit` bytes, whichever
/// comes first. A read stopping short of a terminator (at the end of the
/// reader, or at the limit) has one appended.
#[derive(Debug)]
pub struct Records<R> {
    inner: R,
    buf: Vec<u8>,
    limit: usize,
    position: u64,
}

impl<R: BufRead> Records<R> {
    /// Frame records of up to [`MAX_RECORD_LENGTH`] bytes.
    pub fn new(inner: R) -> Self {
        Self::with_limit(inner, MAX_RECORD_LENGTH)
    }

    /// Frame records of up to `limit` bytes.
    pub fn with_limit(inner: R, limit: usize) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            limit,
            position: 0,
        }
    }

    /// Number of bytes consumed from the reader.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Unwrap the reader, dropping any buffered record.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> NextRaw for Records<R> {
    fn next_raw(&mut self) -> Result<Option<&[u8]>, Error> {
        self.buf.clear();

        let n = (&mut self.inner)
            .take(self.limit as u64)
            .read_until(RECORD_TERMINATOR, &mut self.buf)?;

        if n == 0 {
            return Ok(None);
        }

        self.position += n as u64;

        if self.buf.last() != Some(&RECORD_TERMINATOR) {
            warn!(position = self.position, length = n, "record is not terminated");
            self.buf.push(RECORD_TERMINATOR);
        }

        trace!(position = self.position, length = self.buf.len(), "framed record");

        Ok(Some(self.buf.as_slice()))
    }
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Vec<u8>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_raw().map(|r| r.map(<[u8]>::to_vec)).transpose()
    }
}

/// Open a file, framing its records.
///
/// Fails if the file does not exist or cannot be read.
pub fn open(path: impl AsRef<Path>) -> Result<Records<BufReader<File>>, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if file.metadata()?.is_dir() {
        Err(Error::NotAFile(path.to_path_buf()))?;
    }

    debug!(path = %path.display(), "opened record file");

    Ok(Records::new(BufReader::new(file)))
}
