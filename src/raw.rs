use crate::platform::{AlignedOps, Platform};
use crate::region::REGION_SIZE;
use alloc::vec;
#[cfg(feature = "defmt")]
use defmt::trace;

/// Reads the full record image. Reads are widened to the platform read size, the surplus is
/// dropped.
pub(crate) fn read_region<T: Platform>(
    hal: &mut T,
    offset: u32,
) -> Result<[u8; REGION_SIZE], T::Error> {
    #[cfg(feature = "defmt")]
    trace!("read_region @{:#08x}", offset);

    let mut buf = vec![0xFFu8; T::align_read(REGION_SIZE)];
    hal.read(offset, &mut buf)?;

    let mut raw = [0u8; REGION_SIZE];
    raw.copy_from_slice(&buf[..REGION_SIZE]);
    Ok(raw)
}

/// Erases every sector touched by the record.
pub(crate) fn erase_region<T: Platform>(hal: &mut T, offset: u32) -> Result<(), T::Error> {
    let end = offset + T::align_erase_ceil(REGION_SIZE) as u32;

    #[cfg(feature = "defmt")]
    trace!("erase_region @{:#08x}..{:#08x}", offset, end);

    hal.erase(offset, end)
}

#[inline(always)]
pub(crate) fn write_aligned<T: Platform>(
    hal: &mut T,
    offset: u32,
    bytes: &[u8],
) -> Result<(), T::Error> {
    #[cfg(feature = "defmt")]
    trace!("write_aligned @{:#08x}: [{}]", offset, bytes.len());

    if bytes.len().is_multiple_of(T::WRITE_SIZE) {
        hal.write(offset, bytes)
    } else {
        let pivot = T::align_write_floor(bytes.len());
        let header = &bytes[..pivot];
        let trailer = &bytes[pivot..];
        if !header.is_empty() {
            hal.write(offset, header)?;
        }

        // no need to write the trailer if remaining data is all ones - this the default state of the flash
        if trailer.iter().any(|&e| e != 0xFF) {
            let mut buf = vec![0xFFu8; T::WRITE_SIZE];
            buf[..trailer.len()].copy_from_slice(trailer);
            hal.write(offset + (pivot as u32), &buf)?
        }

        Ok(())
    }
}
