use crate::item::ItemType;
use thiserror::Error;

/// Errors that can occur while accessing the traceability record. Marked as non-exhaustive to
/// allow for future additions without breaking the API.
#[derive(Error, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The region offset has to be aligned to the erase size of the flash
    #[error("invalid region offset")]
    InvalidRegionOffset,

    /// The record does not fit into the flash at the given offset
    #[error("region out of bounds")]
    RegionOutOfBounds,

    /// The `NorFlash` implementation of the platform returned an error
    #[error("internal flash error")]
    FlashError,

    /// A serialized record has to be exactly `REGION_SIZE` bytes
    #[error("invalid record length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Either the record was never written or it got corrupted
    #[error("checksum mismatch: stored {stored:#06x}, calculated {calculated:#06x}")]
    ChecksumMismatch { stored: u16, calculated: u16 },

    #[error("authentication key checksum mismatch")]
    AuthKeyChecksumMismatch,

    /// The value does not fit into the item
    #[error("value too long for {item}, max {max} bytes")]
    ValueTooLong { item: ItemType, max: usize },

    /// Single byte accessors are only available for items with a width of one byte
    #[error("item width mismatch: {0}")]
    ItemWidthMismatch(ItemType),

    #[error("item is not valid utf-8: {0}")]
    InvalidUtf8(ItemType),

    /// The extend zone definition flag is not set
    #[error("extend zone not defined")]
    NotDefined,
}
