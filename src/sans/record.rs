//! Whole-record decoding.

use core::slice::Iter;

use alloc::vec::Vec;

use super::{
    DataField, Error, Layout, Tag,
    directory::{DirectoryEntry, directory},
    field::{decode_data_field_with, raw_field},
    leader::leader,
};

/// A decoded field of either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<'a> {
    /// A control field (`000` to `009`), kept as raw content.
    Control { tag: Tag, content: &'a [u8] },
    /// A data field, split into indicators and subfields.
    Data { tag: Tag, field: DataField<'a> },
}

impl<'a> Field<'a> {
    /// The tag from the field's directory entry.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Control { tag, .. } | Self::Data { tag, .. } => *tag,
        }
    }

    /// Content of a control field, or `None` for a data field.
    pub fn as_control(&self) -> Option<&'a [u8]> {
        match self {
            Self::Control { content, .. } => Some(*content),
            Self::Data { .. } => None,
        }
    }

    /// The decoded data field, or `None` for a control field.
    pub fn as_data(&self) -> Option<&DataField<'a>> {
        match self {
            Self::Control { .. } => None,
            Self::Data { field, .. } => Some(field),
        }
    }
}

/// Iterator decoding the fields of a record in directory order.
///
/// Data fields are decoded with the layout declared by the record's leader.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    entries: Iter<'a, DirectoryEntry>,
    record: &'a [u8],
    base: usize,
    layout: Layout,
}

impl<'a> Fields<'a> {
    fn decode(&self, entry: &DirectoryEntry) -> Result<Field<'a>, Error> {
        let tag = entry.tag();
        let r = raw_field(entry, self.record, self.base)?;

        Ok(if tag.is_control() {
            Field::Control { tag, content: r }
        } else {
            let field = decode_data_field_with(r, self.layout)?;
            Field::Data { tag, field }
        })
    }
}

impl<'a> Iterator for Fields<'a> {
    type Item = Result<Field<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        Some(self.decode(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Fields<'_> {}

/// Lazily decode the fields of a record.
///
/// The leader and directory are checked up front; each field is checked as
/// it is reached.
pub fn fields(record: &[u8]) -> Result<Fields<'_>, Error> {
    let leader = leader(record)?;

    Ok(Fields {
        entries: directory(record)?.iter(),
        record,
        base: leader.base_address()?,
        layout: leader.layout()?,
    })
}

/// Decode every field of a record, in directory order.
pub fn decode_record(record: &[u8]) -> Result<Vec<Field<'_>>, Error> {
    fields(record)?.collect()
}
