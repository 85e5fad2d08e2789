//! The 24-byte record leader.

use core::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::{Error, StructuralError, check::decimal, field::Layout};

/// A view of a record leader.
///
/// Only the values needed to locate fields are parsed; the remaining
/// positions are exposed as the bytes found. Numeric accessors fail with a
/// [`StructuralError`] if their positions hold anything but ASCII digits.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
pub struct Leader {
    record_length: [u8; 5],
    record_status: u8,
    record_type: u8,
    bibliographic_level: u8,
    control_type: u8,
    coding_scheme: u8,
    indicator_count: u8,
    subfield_code_length: u8,
    base_address: [u8; 5],
    implementation_defined: [u8; 3],
    entry_map: [u8; 4],
}

impl Leader {
    /// The declared length of the record, terminator included.
    pub fn record_length(&self) -> Result<usize, StructuralError> {
        decimal(&self.record_length, "record length")
    }

    /// Record status (position 5), such as `n` for new or `c` for corrected.
    pub fn record_status(&self) -> u8 {
        self.record_status
    }

    /// Type of record (position 6), such as `a` for language material.
    pub fn record_type(&self) -> u8 {
        self.record_type
    }

    /// Bibliographic level (position 7).
    pub fn bibliographic_level(&self) -> u8 {
        self.bibliographic_level
    }

    /// Type of control (position 8).
    pub fn control_type(&self) -> u8 {
        self.control_type
    }

    /// Character coding scheme (position 9): blank for MARC-8, `a` for UCS.
    pub fn coding_scheme(&self) -> u8 {
        self.coding_scheme
    }

    /// Whether field content is declared to be Unicode.
    ///
    /// Content of other records is MARC-8 (or a local encoding), and is never
    /// transcoded by this crate.
    pub fn is_unicode(&self) -> bool {
        self.coding_scheme == b'a'
    }

    /// Number of indicators opening each data field (position 10).
    pub fn indicator_count(&self) -> Result<usize, StructuralError> {
        decimal(&[self.indicator_count], "indicator count")
    }

    /// Length of each subfield code, delimiter included (position 11).
    pub fn subfield_code_length(&self) -> Result<usize, StructuralError> {
        decimal(&[self.subfield_code_length], "subfield code length")
    }

    /// Offset from the start of the record to the first field.
    pub fn base_address(&self) -> Result<usize, StructuralError> {
        decimal(&self.base_address, "base address")
    }

    /// Entry map (positions 20 to 23), `4500` in MARC 21.
    pub fn entry_map(&self) -> &[u8; 4] {
        &self.entry_map
    }

    /// Data field widths declared by this leader.
    pub fn layout(&self) -> Result<Layout, StructuralError> {
        Ok(Layout {
            indicator_count: self.indicator_count()?,
            subfield_code_length: self.subfield_code_length()?,
        })
    }
}

impl fmt::Debug for Leader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Leader(\"{}\")", self.as_bytes().escape_ascii())
    }
}

/// View the leader at the start of a record.
pub fn leader(record: &[u8]) -> Result<&Leader, Error> {
    let (leader, _) = Leader::ref_from_prefix(record)
        .map_err(|_| StructuralError::TruncatedLeader(record.len()))?;

    Ok(leader)
}

/// Read the base address of data from a record's leader.
pub fn base_address(record: &[u8]) -> Result<usize, Error> {
    Ok(leader(record)?.base_address()?)
}
