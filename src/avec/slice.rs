//! Slice-based record stream.

use core::iter::FusedIterator;

use tracing::{trace, warn};

use crate::sans::RECORD_TERMINATOR;

use super::{Error, NextRaw};

/// Records framed from a slice, each borrowed from it.
///
/// Bytes following the last record terminator do not form a record. They end
/// the stream, and are discarded with a warning.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    r: &'a [u8],
    position: usize,
}

impl<'a> Records<'a> {
    /// Frame records from the start of a slice.
    pub fn new(r: &'a [u8]) -> Self {
        Self { r, position: 0 }
    }

    /// Offset of the next record in the slice.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The bytes not yet framed.
    pub fn remainder(&self) -> &'a [u8] {
        self.r
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let Some(i) = self.r.iter().position(|&b| b == RECORD_TERMINATOR) else {
            if !self.r.is_empty() {
                warn!(
                    position = self.position,
                    length = self.r.len(),
                    "discarding unterminated bytes"
                );
                self.position += self.r.len();
                self.r = &[];
            }

            return None;
        };

        let (record, r) = self.r.split_at(i + 1);
        trace!(position = self.position, length = record.len(), "framed record");

        self.r = r;
        self.position += record.len();

        Some(record)
    }
}

impl FusedIterator for Records<'_> {}

impl NextRaw for Records<'_> {
    fn next_raw(&mut self) -> Result<Option<&[u8]>, Error> {
        Ok(self.next())
    }
}
