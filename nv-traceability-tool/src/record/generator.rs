use std::collections::HashSet;

use nv_traceability::{TracabilityRegion, ZoneField, PAD_BYTE};

use super::crc::SoftCrc;
use super::{validate_value, Field};
use crate::error::Error;
use crate::{Fill, TracabilityRecord};

/// Generate a sealed record image in memory.
pub(crate) fn generate_image_data(
    record: &TracabilityRecord,
    fill: Fill,
) -> Result<Vec<u8>, Error> {
    let mut region = match fill {
        Fill::Erased => TracabilityRegion::erased(),
        Fill::Zeroed => TracabilityRegion::zeroed(),
    };

    let mut seen = HashSet::new();
    for entry in &record.entries {
        if !seen.insert(entry.field) {
            return Err(Error::DuplicateField(entry.field.to_string()));
        }
        validate_value(&entry.field, &entry.value)?;

        let value = entry.value.as_bytes();
        let dst = &mut region.as_bytes_mut()[entry.field.range()];
        let (head, tail) = dst.split_at_mut(value.len());
        head.copy_from_slice(value);
        tail.fill(PAD_BYTE);
    }

    // a key without an explicit checksum row gets its checksum calculated
    if seen.contains(&Field::Zone(ZoneField::AuthKey))
        && !seen.contains(&Field::Zone(ZoneField::AuthKeyChecksum))
    {
        let key = region.extend_zone.auth_key;
        region.extend_zone.set_auth_key::<SoftCrc>(&key);
    }

    region.seal::<SoftCrc>();
    Ok(region.to_bytes().to_vec())
}
