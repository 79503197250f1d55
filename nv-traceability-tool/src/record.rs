pub mod crc;

pub(crate) mod generator;
pub(crate) mod parser;

use std::ops::Range;
use std::str::FromStr;

use nv_traceability::region::{EXTEND_ZONE_OFFSET, NAME_SIZE};
use nv_traceability::{ItemType, ZoneField};

use crate::error::Error;

/// A single named field of the record together with the value to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub field: Field,
    pub value: FieldValue,
}

impl Entry {
    pub fn new(field: Field, value: FieldValue) -> Self {
        Self { field, value }
    }
}

/// Every field of the record that can be set from a CSV file. The checksum is not a field, it
/// is calculated on generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The record name tag.
    Name,
    /// A traceability item, including the dedicated IMEI and address fields.
    Item(ItemType),
    /// A field of the extend zone.
    Zone(ZoneField),
}

impl Field {
    /// All fields in record order.
    pub fn all() -> impl Iterator<Item = Field> {
        use strum::IntoEnumIterator;

        std::iter::once(Field::Name)
            .chain(ItemType::iter().map(Field::Item))
            .chain(ZoneField::iter().map(Field::Zone))
    }

    /// Byte range inside the serialized record.
    pub fn range(&self) -> Range<usize> {
        match self {
            Field::Name => 0..NAME_SIZE,
            Field::Item(item) => item.record_range(),
            Field::Zone(field) => {
                let range = field.range();
                EXTEND_ZONE_OFFSET + range.start..EXTEND_ZONE_OFFSET + range.end
            }
        }
    }

    pub fn width(&self) -> usize {
        self.range().len()
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "NAME" {
            return Ok(Field::Name);
        }
        if let Ok(item) = s.parse::<ItemType>() {
            return Ok(Field::Item(item));
        }
        if let Ok(field) = s.parse::<ZoneField>() {
            return Ok(Field::Zone(field));
        }
        Err(Error::InvalidField(s.to_string()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Name => f.write_str("NAME"),
            Field::Item(item) => write!(f, "{item}"),
            Field::Zone(field) => write!(f, "{field}"),
        }
    }
}

/// The value of a field. Values shorter than the field are padded with
/// [`nv_traceability::PAD_BYTE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Single byte.
    U8(u8),
    /// ASCII text (without padding).
    String(String),
    /// Opaque bytes.
    Binary(Vec<u8>),
}

impl FieldValue {
    /// Return the CSV encoding column string for this value.
    ///
    /// `Binary` maps to `"hex2bin"` as most binary fields are addresses and keys that are read as
    /// hex digits anyway.
    pub fn encoding_str(&self) -> &'static str {
        match self {
            Self::U8(_) => "u8",
            Self::String(_) => "string",
            Self::Binary(_) => "hex2bin",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U8(v) => std::slice::from_ref(v),
            Self::String(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U8(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::Binary(b) => f.write_str(&hex::encode_upper(b)),
        }
    }
}

/// Validate that `value` fits into `field`.
pub(crate) fn validate_value(field: &Field, value: &FieldValue) -> Result<(), Error> {
    let len = value.as_bytes().len();
    if len > field.width() {
        return Err(Error::ValueTooLong {
            field: field.to_string(),
            len,
            max: field.width(),
        });
    }
    Ok(())
}
