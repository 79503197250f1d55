use std::fs;
use std::path::Path;

use nv_traceability::{DefinitionFlag, TracabilityRegion, ZoneField, PAD_BYTE};

use super::crc::SoftCrc;
use super::{Entry, Field, FieldValue};
use crate::error::Error;
use crate::TracabilityRecord;

/// Outcome of checking an image without converting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageStatus {
    pub stored_checksum: u16,
    pub calculated_checksum: u16,
    pub definition_flag: DefinitionFlag,
}

impl ImageStatus {
    pub fn checksum_valid(&self) -> bool {
        self.stored_checksum == self.calculated_checksum
    }
}

/// Parse a record image file at the given `path`.
pub(crate) fn parse_image<P: AsRef<Path>>(
    path: P,
    verify: bool,
) -> Result<TracabilityRecord, Error> {
    let data = fs::read(path)?;
    parse_image_data(&data, verify)
}

/// Parse a record image from an in-memory byte slice.
///
/// Fields that are still erased (all `0xFF`) are skipped, so generating an image from the result
/// reproduces the input byte for byte.
pub(crate) fn parse_image_data(data: &[u8], verify: bool) -> Result<TracabilityRecord, Error> {
    let region = TracabilityRegion::try_from_slice(data)?;
    if verify {
        region.verify::<SoftCrc>()?;
    }

    let raw = region.as_bytes();
    let mut record = TracabilityRecord { entries: vec![] };

    for field in Field::all() {
        let bytes = &raw[field.range()];
        if bytes.iter().all(|&e| e == 0xFF) {
            continue;
        }
        record.entries.push(Entry::new(field, decode_value(&field, bytes)));
    }

    Ok(record)
}

pub(crate) fn image_status(data: &[u8]) -> Result<ImageStatus, Error> {
    let region = TracabilityRegion::try_from_slice(data)?;
    Ok(ImageStatus {
        stored_checksum: region.stored_checksum(),
        calculated_checksum: region.calculate_checksum::<SoftCrc>(),
        definition_flag: region.extend_zone.definition_flag(),
    })
}

fn decode_value(field: &Field, bytes: &[u8]) -> FieldValue {
    if *field == Field::Zone(ZoneField::DefinitionFlag) {
        return FieldValue::U8(bytes[0]);
    }

    match as_padded_text(bytes) {
        Some(text) => FieldValue::String(text.to_string()),
        None => FieldValue::Binary(bytes.to_vec()),
    }
}

/// Returns the text if `bytes` holds printable ASCII followed only by padding, which is exactly
/// what the generator writes for string values.
fn as_padded_text(bytes: &[u8]) -> Option<&str> {
    let end = bytes
        .iter()
        .position(|&e| e == PAD_BYTE)
        .unwrap_or(bytes.len());
    let (text, padding) = bytes.split_at(end);

    if text.is_empty() || padding.iter().any(|&e| e != PAD_BYTE) {
        return None;
    }
    if !text.iter().all(|&e| e.is_ascii_graphic() || e == b' ') {
        return None;
    }
    // leading or trailing blanks would not survive a CSV round trip through most editors
    if text.first() == Some(&b' ') || text.last() == Some(&b' ') {
        return None;
    }

    std::str::from_utf8(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_text() {
        assert_eq!(as_padded_text(b"ABC\0\0"), Some("ABC"));
        assert_eq!(as_padded_text(b"ABCDE"), Some("ABCDE"));
        assert_eq!(as_padded_text(b"AB\0C\0"), None);
        assert_eq!(as_padded_text(b"ABC\xFF\xFF"), None);
        assert_eq!(as_padded_text(b"\0\0\0"), None);
        assert_eq!(as_padded_text(b" AB\0"), None);
        assert_eq!(as_padded_text(&[0x00, 0x1A, 0x7D]), None);
    }
}
