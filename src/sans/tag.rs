//! Three-byte field tags.

use core::{fmt, str::FromStr};

use alloc::string::ToString;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use super::Error;

/// A field tag, as stored in a directory entry.
///
/// Tags read from a directory are kept as they are found, since local practice
/// sometimes uses letters. Tags supplied by callers are checked by
/// [`Tag::parse`], [`Tag::control`] or [`Tag::data`], which accept only
/// three ASCII digits.
#[repr(transparent)]
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromBytes, IntoBytes, KnownLayout, Immutable,
    Unaligned,
)]
pub struct Tag([u8; 3]);

impl Tag {
    /// The control number, `001`.
    pub const CONTROL_NUMBER: Tag = Tag(*b"001");

    /// Wrap three raw tag bytes.
    pub const fn new(r: [u8; 3]) -> Self {
        Self(r)
    }

    /// Parse a tag of three ASCII digits.
    pub fn parse(tag: &str) -> Result<Self, Error> {
        Self::checked(tag, "field", |_| true)
    }

    /// Parse a control field tag, `000` through `009`.
    pub fn control(tag: &str) -> Result<Self, Error> {
        Self::checked(tag, "control field", |t| t.is_control())
    }

    /// Parse a data field tag, `010` through `999`.
    pub fn data(tag: &str) -> Result<Self, Error> {
        Self::checked(tag, "data field", |t| !t.is_control())
    }

    fn checked(tag: &str, expected: &'static str, accept: fn(&Tag) -> bool) -> Result<Self, Error> {
        let invalid = || Error::InvalidTag {
            tag: tag.to_string(),
            expected,
        };

        let r: [u8; 3] = tag.as_bytes().try_into().map_err(|_| invalid())?;

        if !r.iter().all(u8::is_ascii_digit) {
            Err(invalid())?;
        }

        let tag = Self(r);
        if accept(&tag) { Ok(tag) } else { Err(invalid()) }
    }

    /// Whether this tag denotes a control field (`00` followed by a digit).
    pub fn is_control(&self) -> bool {
        matches!(self.0, [b'0', b'0', d] if d.is_ascii_digit())
    }

    /// The raw tag bytes.
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// The tag as a string, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.0).ok()
    }
}

impl FromStr for Tag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .iter()
            .flat_map(|b| b.escape_ascii())
            .try_for_each(|c| fmt::Write::write_char(f, char::from(c)))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}
