use crate::error::Error;
use crate::item::ItemType;
use crate::region::TracabilityRegion;

/// Fill byte for the unused tail of an item.
pub const PAD_BYTE: u8 = 0x00;

pub trait Set<T> {
    fn set(&mut self, item: ItemType, value: T) -> Result<(), Error>;
}

impl<T, S: Set<T>> Set<T> for &mut S {
    fn set(&mut self, item: ItemType, value: T) -> Result<(), Error> {
        (*self).set(item, value)
    }
}

impl Set<&[u8]> for TracabilityRegion {
    fn set(&mut self, item: ItemType, value: &[u8]) -> Result<(), Error> {
        let dst = self.item_mut(item);
        if value.len() > dst.len() {
            return Err(Error::ValueTooLong {
                item,
                max: dst.len(),
            });
        }
        let (head, tail) = dst.split_at_mut(value.len());
        head.copy_from_slice(value);
        tail.fill(PAD_BYTE);
        Ok(())
    }
}

impl<const N: usize> Set<&[u8; N]> for TracabilityRegion {
    fn set(&mut self, item: ItemType, value: &[u8; N]) -> Result<(), Error> {
        self.set(item, value.as_slice())
    }
}

impl Set<&str> for TracabilityRegion {
    fn set(&mut self, item: ItemType, value: &str) -> Result<(), Error> {
        self.set(item, value.as_bytes())
    }
}

impl Set<u8> for TracabilityRegion {
    fn set(&mut self, item: ItemType, value: u8) -> Result<(), Error> {
        match self.item_mut(item) {
            [dst] => {
                *dst = value;
                Ok(())
            }
            _ => Err(Error::ItemWidthMismatch(item)),
        }
    }
}
