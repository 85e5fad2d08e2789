//! The record directory.

use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::{
    ENTRY_LENGTH, Error, FIELD_TERMINATOR, LEADER_LENGTH, StructuralError, Tag, check::decimal,
    leader::base_address,
};

/// A 12-byte directory entry, locating one field.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
pub struct DirectoryEntry {
    tag: Tag,
    length: [u8; 4],
    position: [u8; 5],
}

impl DirectoryEntry {
    /// Tag of the field.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Length of the field, including its terminator.
    pub fn length(&self) -> Result<usize, StructuralError> {
        decimal(&self.length, "field length")
    }

    /// Offset of the field from the base address of data.
    pub fn position(&self) -> Result<usize, StructuralError> {
        decimal(&self.position, "field position")
    }
}

impl fmt::Debug for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryEntry")
            .field("tag", &self.tag)
            .field("length", &format_args!("{}", self.length.escape_ascii()))
            .field("position", &format_args!("{}", self.position.escape_ascii()))
            .finish()
    }
}

/// The raw directory of a record, without its closing field terminator.
///
/// Fails if the base address does not leave room for a directory after the
/// leader, or is not immediately preceded by a field terminator.
pub fn directory_raw(record: &[u8]) -> Result<&[u8], Error> {
    let base = base_address(record)?;

    if base <= LEADER_LENGTH || base > record.len() {
        Err(StructuralError::BaseAddress {
            base,
            length: record.len(),
        })?;
    }

    if record[base - 1] != FIELD_TERMINATOR {
        Err(StructuralError::UnterminatedDirectory(base))?;
    }

    Ok(&record[LEADER_LENGTH..base - 1])
}

/// The directory of a record, as a slice of entries in record order.
pub fn directory(record: &[u8]) -> Result<&[DirectoryEntry], Error> {
    let r = directory_raw(record)?;

    if r.len() % ENTRY_LENGTH != 0 {
        Err(StructuralError::DirectoryLength(r.len()))?;
    }

    let entries = <[DirectoryEntry]>::ref_from_bytes(r)
        .map_err(|_| StructuralError::DirectoryLength(r.len()))?;

    Ok(entries)
}
