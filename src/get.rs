//! The `Get<T>` trait and its implementation in this module allows providing a single generic,
//! overloaded function `get<T>()` for all supported item representations.

use crate::error::Error;
use crate::item::ItemType;
use crate::region::TracabilityRegion;
use alloc::string::String;
use alloc::vec::Vec;

pub trait Get<T> {
    fn get(&self, item: ItemType) -> Result<T, Error>;
}

impl<T, G: Get<T>> Get<T> for &G {
    fn get(&self, item: ItemType) -> Result<T, Error> {
        (*self).get(item)
    }
}

impl Get<Vec<u8>> for TracabilityRegion {
    fn get(&self, item: ItemType) -> Result<Vec<u8>, Error> {
        Ok(self.item(item).to_vec())
    }
}

/// Text items end at the first `0x00` or `0xFF`, whichever padding the writer used.
impl Get<String> for TracabilityRegion {
    fn get(&self, item: ItemType) -> Result<String, Error> {
        let raw = self.item(item);
        let end = raw
            .iter()
            .position(|&e| e == 0x00 || e == 0xFF)
            .unwrap_or(raw.len());
        core::str::from_utf8(&raw[..end])
            .map(String::from)
            .map_err(|_| Error::InvalidUtf8(item))
    }
}

impl Get<u8> for TracabilityRegion {
    fn get(&self, item: ItemType) -> Result<u8, Error> {
        match self.item(item) {
            [value] => Ok(*value),
            _ => Err(Error::ItemWidthMismatch(item)),
        }
    }
}
