//! Record streams, framing a byte source into raw records.
//!
//! A record stream splits its source at record terminators, yielding each raw
//! record (terminator included) in source order. Records can then be decoded
//! with the functions in [`crate::sans`].
//!
//! Two streams are provided: [`slice::Records`] over an in-memory buffer,
//! yielding records borrowed from it, and [`reader::Records`] over any
//! buffered reader, yielding records from an internal buffer. Both implement
//! [`NextRaw`], as does [`RecordStream`], which holds either one and is
//! returned by [`open`].
//!
//! Streams advance a cursor that is never rewound, so a stream must not be
//! shared between threads without external locking.

use alloc::string::{String, ToString};
use core::str::FromStr;

use either::Either;
use thiserror::Error;

use crate::sans::ErrorKind;

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

/// Errors occurring while opening or reading a record stream.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying reader or file.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The path names something other than a file.
    #[cfg(feature = "std")]
    #[error("{} is not a file.", .0.display())]
    NotAFile(std::path::PathBuf),
    /// A file source named by bytes that are not a UTF-8 path.
    #[cfg(feature = "std")]
    #[error("Source path is not valid UTF-8.")]
    InvalidPath(#[source] core::str::Utf8Error),
    /// Unknown numeric source kind.
    #[error("Unknown source kind ({0}).")]
    UnknownSource(u8),
    /// Unknown named source kind.
    #[error("Unknown source kind ({0:?}).")]
    UnknownSourceName(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            #[cfg(feature = "std")]
            Self::Io(_) | Self::NotAFile(_) => ErrorKind::Resource,
            #[cfg(feature = "std")]
            Self::InvalidPath(_) => ErrorKind::Argument,
            Self::UnknownSource(_) | Self::UnknownSourceName(_) => ErrorKind::Argument,
        }
    }
}

/// Produce raw records from a source, one at a time.
pub trait NextRaw {
    /// Read the next raw record.
    ///
    /// Returns a non-empty record ending in a record terminator, or `None`
    /// once the source holds no further records.
    fn next_raw(&mut self) -> Result<Option<&[u8]>, Error>;
}

impl<L: NextRaw, R: NextRaw> NextRaw for Either<L, R> {
    fn next_raw(&mut self) -> Result<Option<&[u8]>, Error> {
        either::for_both!(self, s => s.next_raw())
    }
}

/// The kind of source a record stream reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A file, named by its path.
    File,
    /// A buffer in memory.
    Memory,
}

impl TryFrom<u8> for SourceKind {
    type Error = Error;

    fn try_from(kind: u8) -> Result<Self, Self::Error> {
        match kind {
            1 => Ok(Self::File),
            2 => Ok(Self::Memory),
            _ => Err(Error::UnknownSource(kind)),
        }
    }
}

impl FromStr for SourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            _ => Err(Error::UnknownSourceName(s.to_string())),
        }
    }
}

/// A source of records, for [`open`].
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    File(&'a std::path::Path),
    Memory(&'a [u8]),
}

#[cfg(feature = "std")]
impl<'a> Source<'a> {
    /// Pair a source kind with its input: the path of a file, or the buffer
    /// itself.
    ///
    /// A file's path must be valid UTF-8.
    pub fn from_kind(kind: SourceKind, source: &'a [u8]) -> Result<Self, Error> {
        Ok(match kind {
            SourceKind::File => {
                let path = core::str::from_utf8(source).map_err(Error::InvalidPath)?;
                Self::File(std::path::Path::new(path))
            }
            SourceKind::Memory => Self::Memory(source),
        })
    }

    /// The kind of this source.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::File(_) => SourceKind::File,
            Self::Memory(_) => SourceKind::Memory,
        }
    }
}

/// A record stream over either a file or a buffer in memory.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub type RecordStream<'a> =
    Either<reader::Records<std::io::BufReader<std::fs::File>>, slice::Records<'a>>;

/// Open a record stream over a source.
///
/// Opening a file fails if it does not exist or cannot be read; opening a
/// buffer cannot fail.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn open(source: Source<'_>) -> Result<RecordStream<'_>, Error> {
    Ok(match source {
        Source::File(path) => Either::Left(reader::open(path)?),
        Source::Memory(r) => Either::Right(slice::Records::new(r)),
    })
}
