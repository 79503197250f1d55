use crate::error::Error;
use crate::platform::Crc;
use core::mem::{offset_of, size_of};
use core::ops::Range;

pub const AUTH_KEY_SIZE: usize = 16;
pub const AUTH_KEY_CHECKSUM_SIZE: usize = 4;
pub const SPC_SIZE: usize = 6;
pub const LOCK_TOKEN_SIZE: usize = 6;
pub const IMEI_2_SIZE: usize = 15;
pub const ZONE_RESERVED_SIZE: usize = 427;
pub const EXTEND_ZONE_SIZE: usize = 475;

/// Byte value of `definition_flag` once the zone has been provisioned.
pub const ZONE_DEFINED: u8 = 0x31;

const _: () = assert!(
    size_of::<ExtendZone>() == EXTEND_ZONE_SIZE,
    "ExtendZone size must not change, it is persisted"
);

/// Security and identity block embedded at the end of the record.
///
/// `reserved` keeps the zone at a constant size, so new fields are carved out of it instead of
/// moving the record checksum.
#[repr(C, packed)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ExtendZone {
    pub auth_key: [u8; AUTH_KEY_SIZE],
    pub auth_key_checksum: [u8; AUTH_KEY_CHECKSUM_SIZE],
    /// Service programming code.
    pub spc: [u8; SPC_SIZE],
    pub lock_token: [u8; LOCK_TOKEN_SIZE],
    pub imei_2: [u8; IMEI_2_SIZE],
    pub reserved: [u8; ZONE_RESERVED_SIZE],
    pub definition_flag: u8,
}

/// Interpretation of the `definition_flag` byte. Only [`ZONE_DEFINED`] counts as provisioned, any
/// other value (including the erased `0xFF`) is kept for diagnostics.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DefinitionFlag {
    Defined,
    Undefined(u8),
}

impl From<u8> for DefinitionFlag {
    fn from(val: u8) -> Self {
        match val {
            ZONE_DEFINED => DefinitionFlag::Defined,
            other => DefinitionFlag::Undefined(other),
        }
    }
}

impl From<DefinitionFlag> for u8 {
    fn from(val: DefinitionFlag) -> Self {
        match val {
            DefinitionFlag::Defined => ZONE_DEFINED,
            DefinitionFlag::Undefined(raw) => raw,
        }
    }
}

/// Named fields of [`ExtendZone`], used where fields are addressed generically.
#[derive(
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Copy,
    Clone,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneField {
    AuthKey,
    AuthKeyChecksum,
    Spc,
    LockToken,
    #[strum(to_string = "IMEI_2")]
    Imei2,
    Reserved,
    DefinitionFlag,
}

impl ZoneField {
    /// Byte range inside the serialized zone.
    pub const fn range(self) -> Range<usize> {
        let (start, width) = match self {
            ZoneField::AuthKey => (offset_of!(ExtendZone, auth_key), AUTH_KEY_SIZE),
            ZoneField::AuthKeyChecksum => (
                offset_of!(ExtendZone, auth_key_checksum),
                AUTH_KEY_CHECKSUM_SIZE,
            ),
            ZoneField::Spc => (offset_of!(ExtendZone, spc), SPC_SIZE),
            ZoneField::LockToken => (offset_of!(ExtendZone, lock_token), LOCK_TOKEN_SIZE),
            ZoneField::Imei2 => (offset_of!(ExtendZone, imei_2), IMEI_2_SIZE),
            ZoneField::Reserved => (offset_of!(ExtendZone, reserved), ZONE_RESERVED_SIZE),
            ZoneField::DefinitionFlag => (offset_of!(ExtendZone, definition_flag), 1),
        };
        start..start + width
    }

    pub const fn width(self) -> usize {
        let range = self.range();
        range.end - range.start
    }
}

impl ExtendZone {
    /// A zone as found on freshly erased flash.
    pub const fn erased() -> Self {
        Self::filled(0xFF)
    }

    pub const fn zeroed() -> Self {
        Self::filled(0x00)
    }

    const fn filled(byte: u8) -> Self {
        Self {
            auth_key: [byte; AUTH_KEY_SIZE],
            auth_key_checksum: [byte; AUTH_KEY_CHECKSUM_SIZE],
            spc: [byte; SPC_SIZE],
            lock_token: [byte; LOCK_TOKEN_SIZE],
            imei_2: [byte; IMEI_2_SIZE],
            reserved: [byte; ZONE_RESERVED_SIZE],
            definition_flag: byte,
        }
    }

    pub fn definition_flag(&self) -> DefinitionFlag {
        self.definition_flag.into()
    }

    pub fn is_defined(&self) -> bool {
        self.definition_flag() == DefinitionFlag::Defined
    }

    pub fn mark_defined(&mut self) {
        self.definition_flag = ZONE_DEFINED;
    }

    pub fn as_bytes(&self) -> &[u8; EXTEND_ZONE_SIZE] {
        // SAFETY: packed struct of u8 fields, same size and alignment as the array
        unsafe { &*(self as *const Self as *const [u8; EXTEND_ZONE_SIZE]) }
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; EXTEND_ZONE_SIZE] {
        // SAFETY: every bit pattern is a valid ExtendZone
        unsafe { &mut *(self as *mut Self as *mut [u8; EXTEND_ZONE_SIZE]) }
    }

    pub fn field(&self, field: ZoneField) -> &[u8] {
        &self.as_bytes()[field.range()]
    }

    pub fn field_mut(&mut self, field: ZoneField) -> &mut [u8] {
        &mut self.as_bytes_mut()[field.range()]
    }

    /// Stores the authentication key together with its checksum.
    pub fn set_auth_key<C: Crc>(&mut self, key: &[u8; AUTH_KEY_SIZE]) {
        self.auth_key = *key;
        self.auth_key_checksum = Self::calculate_auth_key_checksum::<C>(key).to_le_bytes();
    }

    pub fn verify_auth_key<C: Crc>(&self) -> Result<(), Error> {
        let key = self.auth_key;
        let stored = u32::from_le_bytes(self.auth_key_checksum);
        if stored != Self::calculate_auth_key_checksum::<C>(&key) {
            return Err(Error::AuthKeyChecksumMismatch);
        }
        Ok(())
    }

    fn calculate_auth_key_checksum<C: Crc>(key: &[u8; AUTH_KEY_SIZE]) -> u32 {
        C::crc32(0, key)
    }
}
