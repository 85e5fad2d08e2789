//! Pure decoding operations over a single raw record.
//!
//! Every function in this module is a function of its input bytes alone. No
//! state is kept between calls, and decoded values borrow from the record
//! slice they were decoded from, so a record buffer may be decoded from any
//! number of threads at once.
//!
//! # Record Structure
//!
//! A raw record is laid out, left to right, as:
//!
//! - a 24-byte [`Leader`],
//! - a directory of 12-byte [`DirectoryEntry`] values, closed by a field
//!   terminator,
//! - the field data area, each field closed by a field terminator,
//! - a record terminator.
//!
//! The leader's base address points at the first byte of the field data area,
//! and each directory entry locates its field relative to that address.
//!
//! Most callers want [`decode_record`], or the tag-based accessors
//! [`control_field`], [`control_fields`], [`data_fields`] and
//! [`decode_data_field`]. The lower-level [`leader`], [`directory`] and
//! [`raw_field`] functions are exposed for callers that walk records
//! themselves.
//!
//! # Errors
//!
//! Malformed input is reported immediately, and nothing is coerced to an
//! empty value: a directory entry reaching past the record is a
//! [`StructuralError`], not a short field. A tag absent from a record is
//! [`Error::NotFound`], which callers treating a field as optional must
//! handle explicitly.

use alloc::string::String;

use thiserror::Error;

pub mod check;
pub mod directory;
pub mod field;
pub mod leader;
pub mod record;
pub mod tag;

pub use directory::{DirectoryEntry, directory, directory_raw};
pub use field::{
    DataField, Layout, Subfield, Subfields, control_field, control_fields, control_number,
    data_field, data_fields, decode_data_field, decode_data_field_with, field, raw_field,
};
pub use leader::{Leader, base_address, leader};
pub use record::{Field, Fields, decode_record, fields};
pub use tag::Tag;

/// Byte closing every record.
pub const RECORD_TERMINATOR: u8 = 0x1D;
/// Byte closing the directory and every field.
pub const FIELD_TERMINATOR: u8 = 0x1E;
/// Byte introducing every subfield.
pub const SUBFIELD_DELIMITER: u8 = 0x1F;

/// Length of the leader, in bytes.
pub const LEADER_LENGTH: usize = 24;
/// Length of a directory entry, in bytes.
pub const ENTRY_LENGTH: usize = 12;
/// Largest record the five-digit record length can describe.
pub const MAX_RECORD_LENGTH: usize = 99_999;

/// The broad class of a failure, shared by decoder and stream errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a malformed argument.
    Argument,
    /// The input source could not be opened or read.
    Resource,
    /// The requested field is absent from the record.
    NotFound,
    /// The record violates the structure of the format.
    Structural,
}

/// Errors occurring while decoding a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A tag supplied by the caller is malformed for the requested field type.
    #[error("Tag {tag:?} is not a valid {expected} tag.")]
    InvalidTag { tag: String, expected: &'static str },
    /// The requested tag does not occur in the record.
    #[error("Field {0} not found.")]
    NotFound(Tag),
    /// The record is malformed.
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTag { .. } => ErrorKind::Argument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Structural(_) => ErrorKind::Structural,
        }
    }
}

/// A violation of the record structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// The record is too short to hold a leader.
    #[error("Record of {0} bytes is too short to hold a leader.")]
    TruncatedLeader(usize),
    /// A fixed-width number holds something other than ASCII digits.
    #[error("The {0} is not a decimal number.")]
    NotNumeric(&'static str),
    /// The base address cannot follow the leader and a terminated directory.
    #[error("Base address ({base}) lies outside the record ({length} bytes).")]
    BaseAddress { base: usize, length: usize },
    /// The byte before the base address is not a field terminator.
    #[error("Directory is not terminated before the base address ({0}).")]
    UnterminatedDirectory(usize),
    /// The directory cannot be split into whole entries.
    #[error("Directory length ({0}) is not a multiple of 12.")]
    DirectoryLength(usize),
    /// A directory entry locates its field outside the record.
    #[error("Field {tag} spans bytes {start}..{end}, past the end of the record ({length} bytes).")]
    FieldOutOfRange {
        tag: Tag,
        start: usize,
        end: usize,
        length: usize,
    },
    /// A directory entry leaves no room for the field terminator.
    #[error("Field {0} has a length of zero.")]
    EmptyField(Tag),
    /// A data field is shorter than its indicators.
    #[error("Data field of {length} bytes cannot hold {indicators} indicators.")]
    TruncatedField { length: usize, indicators: usize },
}
