//! Field access and data field decoding.

use core::{fmt, slice::Split};

use alloc::vec::Vec;
use tracing::debug;

use super::{
    Error, SUBFIELD_DELIMITER, StructuralError, Tag,
    directory::{DirectoryEntry, directory},
    leader::base_address,
};

/// Widths of the fixed parts of a data field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Number of indicator bytes opening each data field.
    pub indicator_count: usize,
    /// Length of each subfield code, delimiter included.
    pub subfield_code_length: usize,
}

impl Layout {
    /// The MARC 21 layout: two indicators and single-byte subfield codes.
    pub const MARC21: Layout = Layout {
        indicator_count: 2,
        subfield_code_length: 2,
    };

    /// Width of a subfield code, delimiter excluded.
    pub fn code_width(&self) -> usize {
        self.subfield_code_length.saturating_sub(1)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::MARC21
    }
}

/// A decoded data field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataField<'a> {
    pub indicators: &'a [u8],
    pub subfields: Vec<Subfield<'a>>,
}

impl<'a> DataField<'a> {
    /// The first indicator, if the layout has one.
    pub fn indicator1(&self) -> Option<u8> {
        self.indicators.first().copied()
    }

    /// The second indicator, if the layout has one.
    pub fn indicator2(&self) -> Option<u8> {
        self.indicators.get(1).copied()
    }

    /// Content of the first subfield with a single-byte code.
    pub fn subfield(&self, code: u8) -> Option<&'a [u8]> {
        self.subfields
            .iter()
            .find(|s| s.code == [code].as_slice())
            .map(|s| s.content)
    }
}

/// A subfield of a data field, with its delimiter stripped.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subfield<'a> {
    pub code: &'a [u8],
    pub content: &'a [u8],
}

impl fmt::Debug for Subfield<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subfield")
            .field("code", &format_args!("{}", self.code.escape_ascii()))
            .field("content", &format_args!("{}", self.content.escape_ascii()))
            .finish()
    }
}

/// Iterator over the subfields of a data field.
///
/// Empty segments, produced by consecutive delimiters, are skipped.
#[derive(Debug, Clone)]
pub struct Subfields<'a> {
    inner: Split<'a, u8, fn(&u8) -> bool>,
    code_width: usize,
}

impl<'a> Subfields<'a> {
    /// Iterate over the subfields of a data field's bytes following its
    /// indicators.
    ///
    /// The first byte, the delimiter opening the first subfield, is skipped.
    pub fn new(r: &'a [u8], layout: Layout) -> Self {
        fn is_delimiter(b: &u8) -> bool {
            *b == SUBFIELD_DELIMITER
        }

        let r = r.get(1..).unwrap_or_default();

        Self {
            inner: r.split(is_delimiter as fn(&u8) -> bool),
            code_width: layout.code_width(),
        }
    }
}

impl<'a> Iterator for Subfields<'a> {
    type Item = Subfield<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let r = self.inner.find(|r| !r.is_empty())?;
        let (code, content) = r.split_at(self.code_width.min(r.len()));

        Some(Subfield { code, content })
    }
}

/// The content of a field, without its terminator.
///
/// Fails rather than truncating if the entry reaches past the record.
pub fn raw_field<'a>(
    entry: &DirectoryEntry,
    record: &'a [u8],
    base_address: usize,
) -> Result<&'a [u8], Error> {
    let length = entry.length()?;

    if length == 0 {
        Err(StructuralError::EmptyField(entry.tag()))?;
    }

    let position = entry.position()?;
    let start = base_address.checked_add(position);
    let end = start.and_then(|s| s.checked_add(length));

    match (start, end) {
        (Some(start), Some(end)) if end <= record.len() => Ok(&record[start..end - 1]),
        _ => Err(StructuralError::FieldOutOfRange {
            tag: entry.tag(),
            start: base_address.saturating_add(position),
            end: base_address.saturating_add(position).saturating_add(length),
            length: record.len(),
        })?,
    }
}

/// The control number (`001`) of a record, read from the first directory
/// entry without scanning.
///
/// This requires `001` to be the first field, as cataloguing practice
/// dictates. Records breaking that rule fail with [`Error::NotFound`], even
/// if they carry a `001` elsewhere; use [`control_field`] to scan for it.
pub fn control_number(record: &[u8]) -> Result<&[u8], Error> {
    let base = base_address(record)?;

    match directory(record)?.first() {
        Some(entry) if entry.tag() == Tag::CONTROL_NUMBER => raw_field(entry, record, base),
        first => {
            debug!(first = ?first.map(DirectoryEntry::tag), "001 is not the first field");
            Err(Error::NotFound(Tag::CONTROL_NUMBER))
        }
    }
}

/// The first field with a tag, of any kind.
pub fn field<'a>(tag: &str, record: &'a [u8]) -> Result<&'a [u8], Error> {
    first(Tag::parse(tag)?, record)
}

/// The first control field with a tag.
pub fn control_field<'a>(tag: &str, record: &'a [u8]) -> Result<&'a [u8], Error> {
    first(Tag::control(tag)?, record)
}

/// Every control field with a tag, in record order.
///
/// An empty list is returned if the tag does not occur.
pub fn control_fields<'a>(tag: &str, record: &'a [u8]) -> Result<Vec<&'a [u8]>, Error> {
    select(Tag::control(tag)?, record)?.collect()
}

/// The first data field with a tag.
pub fn data_field<'a>(tag: &str, record: &'a [u8]) -> Result<&'a [u8], Error> {
    first(Tag::data(tag)?, record)
}

/// Every data field with a tag, in record order.
///
/// An empty list is returned if the tag does not occur.
pub fn data_fields<'a>(tag: &str, record: &'a [u8]) -> Result<Vec<&'a [u8]>, Error> {
    select(Tag::data(tag)?, record)?.collect()
}

/// Decode a data field of the MARC 21 layout.
///
/// The field's first two bytes are its indicators, and every subfield has a
/// one-byte code.
pub fn decode_data_field(field: &[u8]) -> Result<DataField<'_>, Error> {
    decode_data_field_with(field, Layout::MARC21)
}

/// Decode a data field of any layout, such as that declared by a record's
/// leader.
pub fn decode_data_field_with(field: &[u8], layout: Layout) -> Result<DataField<'_>, Error> {
    let (indicators, r) = field.split_at_checked(layout.indicator_count).ok_or(
        StructuralError::TruncatedField {
            length: field.len(),
            indicators: layout.indicator_count,
        },
    )?;

    Ok(DataField {
        indicators,
        subfields: Subfields::new(r, layout).collect(),
    })
}

fn first(tag: Tag, record: &[u8]) -> Result<&[u8], Error> {
    select(tag, record)?
        .next()
        .unwrap_or(Err(Error::NotFound(tag)))
}

fn select<'a>(
    tag: Tag,
    record: &'a [u8],
) -> Result<impl Iterator<Item = Result<&'a [u8], Error>>, Error> {
    let base = base_address(record)?;

    Ok(directory(record)?
        .iter()
        .filter(move |e| e.tag() == tag)
        .map(move |e| raw_field(e, record, base)))
}
