#![doc = include_str ! ("../README.md")]
#![cfg_attr(not(target_arch = "x86_64"), no_std)]

pub mod error;
mod get;
pub mod item;
pub mod platform;
mod raw;
pub mod region;
mod set;
pub mod zone;

pub use get::Get;
pub use item::{ItemType, NV_TRACA_DATA_START, TRACABILITY_ITEM_TYPE_MAX};
pub use region::{REGION_SIZE, TracabilityRegion};
pub use set::{PAD_BYTE, Set};
pub use zone::{DefinitionFlag, ExtendZone, ZoneField};

extern crate alloc;

use crate::error::Error;
use crate::platform::{AlignedOps, Platform};
#[cfg(feature = "defmt")]
use defmt::warn;

/// Handle to a traceability record stored at a fixed offset of a NOR flash.
///
/// The handle keeps no copy of the record, every call goes to the flash. The sectors covering the
/// record belong to it exclusively since [`NvRegion::store`] erases them.
pub struct NvRegion<T: Platform> {
    pub(crate) hal: T,
    pub(crate) offset: u32,
    pub(crate) faulted: bool,
}

impl<T: Platform> NvRegion<T> {
    /// The offset has to be aligned to the erase size of the flash and the record has to fit
    /// behind it.
    pub fn new(offset: usize, hal: T) -> Result<NvRegion<T>, Error> {
        if !offset.is_multiple_of(T::ERASE_SIZE) {
            return Err(Error::InvalidRegionOffset);
        }

        let end = offset
            .checked_add(T::align_erase_ceil(REGION_SIZE))
            .ok_or(Error::RegionOutOfBounds)?;
        if end > hal.capacity() || end > u32::MAX as usize {
            return Err(Error::RegionOutOfBounds);
        }

        Ok(Self {
            hal,
            offset: offset as u32,
            faulted: false,
        })
    }

    /// Reads the record and verifies its checksum.
    pub fn load(&mut self) -> Result<TracabilityRegion, Error> {
        let region = self.load_unchecked()?;
        match region.verify::<T>() {
            Ok(()) => Ok(region),
            Err(e) => {
                #[cfg(feature = "defmt")]
                warn!("traceability record @{:#08x}: {}", self.offset, e);
                Err(e)
            }
        }
    }

    /// Reads the record without looking at the checksum, e.g. to recover data from a corrupted
    /// image.
    pub fn load_unchecked(&mut self) -> Result<TracabilityRegion, Error> {
        if self.faulted {
            return Err(Error::FlashError);
        }

        match raw::read_region(&mut self.hal, self.offset) {
            Ok(raw) => Ok(TracabilityRegion::from_bytes(raw)),
            Err(_) => Err(self.fault()),
        }
    }

    /// Seals the checksum and replaces the stored record.
    ///
    /// There is no journaling, a power loss between erase and write leaves an erased record
    /// behind.
    pub fn store(&mut self, region: &mut TracabilityRegion) -> Result<(), Error> {
        if self.faulted {
            return Err(Error::FlashError);
        }

        region.seal::<T>();

        raw::erase_region(&mut self.hal, self.offset).map_err(|_| self.fault())?;
        raw::write_aligned(&mut self.hal, self.offset, region.as_bytes())
            .map_err(|_| self.fault())
    }

    /// Get a single item from the flash.
    ///
    /// Supported types are `Vec<u8>`, `String` and `u8` for single byte items.
    pub fn get<R>(&mut self, item: ItemType) -> Result<R, Error>
    where
        TracabilityRegion: Get<R>,
    {
        let region = self.load()?;
        Get::get(&region, item)
    }

    /// Set a single item and write the record back to the flash.
    ///
    /// The stored record has to be valid. Use [`NvRegion::store`] to initialize a blank region.
    pub fn set<R>(&mut self, item: ItemType, value: R) -> Result<(), Error>
    where
        TracabilityRegion: Set<R>,
    {
        let mut region = self.load()?;
        Set::set(&mut region, item, value)?;
        self.store(&mut region)
    }

    /// Returns true if the stored record is valid and its extend zone carries the definition flag.
    pub fn is_defined(&mut self) -> Result<bool, Error> {
        Ok(self.load()?.is_defined())
    }

    /// Reads the extend zone, failing with [`Error::NotDefined`] if the zone was never
    /// provisioned.
    pub fn extend_zone(&mut self) -> Result<ExtendZone, Error> {
        let region = self.load()?;
        let zone = region.extend_zone;
        if !zone.is_defined() {
            return Err(Error::NotDefined);
        }
        Ok(zone)
    }

    /// Hands back the flash.
    pub fn release(self) -> T {
        self.hal
    }

    fn fault(&mut self) -> Error {
        #[cfg(feature = "defmt")]
        warn!("traceability record @{:#08x}: flash fault", self.offset);

        self.faulted = true;
        Error::FlashError
    }
}
