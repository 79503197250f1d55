use crate::error::Error;
use crate::item::ItemType;
use crate::platform::Crc;
use crate::zone::{EXTEND_ZONE_SIZE, ExtendZone};
use core::fmt::{Debug, Formatter};
use core::mem::{offset_of, size_of, transmute};

pub const NAME_SIZE: usize = 4;
pub const IMEI_SIZE: usize = 15;
pub const BD_ADDR_SIZE: usize = 6;
pub const WIFI_ADDR_SIZE: usize = 6;
pub const TEST_STATUS_SIZE: usize = 4;
pub const DATA_SIZE: usize = 512;
pub const CHECKSUM_SIZE: usize = 2;
pub const REGION_SIZE: usize = NAME_SIZE
    + IMEI_SIZE
    + BD_ADDR_SIZE
    + WIFI_ADDR_SIZE
    + TEST_STATUS_SIZE
    + DATA_SIZE
    + EXTEND_ZONE_SIZE
    + CHECKSUM_SIZE;

pub(crate) const IMEI_OFFSET: usize = offset_of!(TracabilityRegion, imei);
pub(crate) const BD_ADDR_OFFSET: usize = offset_of!(TracabilityRegion, bd_addr);
pub(crate) const WIFI_ADDR_OFFSET: usize = offset_of!(TracabilityRegion, wifi_addr);
pub(crate) const TEST_STATUS_OFFSET: usize = offset_of!(TracabilityRegion, test_status);
pub(crate) const DATA_OFFSET: usize = offset_of!(TracabilityRegion, data);
pub const EXTEND_ZONE_OFFSET: usize = offset_of!(TracabilityRegion, extend_zone);
pub const CHECKSUM_OFFSET: usize = offset_of!(TracabilityRegion, checksum);

// Compile-time assertion to ensure the compiler did not reorder or pad anything
const _: () = assert!(
    size_of::<TracabilityRegion>() == REGION_SIZE
        && EXTEND_ZONE_OFFSET == DATA_OFFSET + DATA_SIZE
        && CHECKSUM_OFFSET == REGION_SIZE - CHECKSUM_SIZE,
    "Record layout must match the stored images"
);

/// The traceability record exactly as it is stored in non-volatile memory.
///
/// All fields are raw byte buffers. Text fields are not null terminated and are padded with
/// whatever the writer chose, usually `0x00` or the erased `0xFF`.
#[repr(C, packed)]
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TracabilityRegion {
    pub name: [u8; NAME_SIZE],
    pub imei: [u8; IMEI_SIZE],
    pub bd_addr: [u8; BD_ADDR_SIZE],
    pub wifi_addr: [u8; WIFI_ADDR_SIZE],
    pub test_status: [u8; TEST_STATUS_SIZE],
    pub data: [u8; DATA_SIZE],
    pub extend_zone: ExtendZone,
    pub checksum: [u8; CHECKSUM_SIZE],
}

impl TracabilityRegion {
    /// A record as found on freshly erased flash.
    pub fn erased() -> Self {
        Self::from_bytes([0xFF; REGION_SIZE])
    }

    pub fn zeroed() -> Self {
        Self::from_bytes([0x00; REGION_SIZE])
    }

    pub fn from_bytes(raw: [u8; REGION_SIZE]) -> Self {
        // SAFETY: packed struct of u8 fields, every bit pattern is valid
        unsafe { transmute(raw) }
    }

    pub fn try_from_slice(raw: &[u8]) -> Result<Self, Error> {
        let raw: [u8; REGION_SIZE] = raw.try_into().map_err(|_| Error::InvalidLength {
            expected: REGION_SIZE,
            actual: raw.len(),
        })?;
        Ok(Self::from_bytes(raw))
    }

    pub fn to_bytes(&self) -> [u8; REGION_SIZE] {
        *self.as_bytes()
    }

    pub fn as_bytes(&self) -> &[u8; REGION_SIZE] {
        // SAFETY: same size, alignment 1
        unsafe { &*(self as *const Self as *const [u8; REGION_SIZE]) }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; REGION_SIZE] {
        // SAFETY: same size, alignment 1, every bit pattern is valid
        unsafe { &mut *(self as *mut Self as *mut [u8; REGION_SIZE]) }
    }

    /// Raw bytes of a single traceability item.
    pub fn item(&self, item: ItemType) -> &[u8] {
        &self.as_bytes()[item.record_range()]
    }

    pub fn item_mut(&mut self, item: ItemType) -> &mut [u8] {
        &mut self.as_bytes_mut()[item.record_range()]
    }

    pub fn stored_checksum(&self) -> u16 {
        u16::from_le_bytes(self.checksum)
    }

    /// Lower 16 bits of the CRC32 over every byte preceding the checksum field.
    pub fn calculate_checksum<C: Crc>(&self) -> u16 {
        C::crc32(0, &self.as_bytes()[..CHECKSUM_OFFSET]) as u16
    }

    /// Updates the checksum field, required after any modification before the record is stored.
    pub fn seal<C: Crc>(&mut self) {
        self.checksum = self.calculate_checksum::<C>().to_le_bytes();
    }

    pub fn verify<C: Crc>(&self) -> Result<(), Error> {
        let stored = self.stored_checksum();
        let calculated = self.calculate_checksum::<C>();
        if stored != calculated {
            return Err(Error::ChecksumMismatch { stored, calculated });
        }
        Ok(())
    }

    pub fn is_defined(&self) -> bool {
        let zone = self.extend_zone;
        zone.is_defined()
    }
}

impl Debug for TracabilityRegion {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = self.name;
        let imei = self.imei;
        let bd_addr = self.bd_addr;
        let wifi_addr = self.wifi_addr;
        let test_status = self.test_status;
        let zone = self.extend_zone;
        let checksum = self.stored_checksum();
        f.write_fmt(format_args!("TracabilityRegion {{ name: {name:02x?}, imei: {imei:02x?}, bd_addr: {bd_addr:02x?}, wifi_addr: {wifi_addr:02x?}, test_status: {test_status:02x?}, flag: {:?}, checksum: 0x{checksum:0>4x} }}", zone.definition_flag()))
    }
}
