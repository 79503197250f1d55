//! Generator and parser for traceability record images.
//!
//! Images are described by CSV files with a `field,encoding,value` header. `field` is either
//! `NAME`, a traceability item such as `IMEI` or `REF_PCBA`, or an extend zone field such as
//! `SPC` or `DEFINITION_FLAG`. Supported encodings are `string`, `hex2bin`, `base64` and `u8`.

pub mod error;
pub mod record;

mod csv;

use std::fs;
use std::io::Write;
use std::path::Path;

pub use error::Error;
pub use nv_traceability::REGION_SIZE;
pub use record::parser::ImageStatus;
pub use record::{Entry, Field, FieldValue};

/// Initial content of every byte not covered by an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// `0xFF`, the state of erased flash.
    #[default]
    Erased,
    /// `0x00`.
    Zeroed,
}

/// The fields to put into a record image.
///
/// This is the in-memory representation used by the CSV and image parsers/generators.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TracabilityRecord {
    /// The ordered list of entries, each field at most once.
    pub entries: Vec<Entry>,
}

impl TracabilityRecord {
    /// Parse CSV content from a string.
    pub fn from_csv(content: &str) -> Result<Self, Error> {
        csv::parser::parse_csv(content)
    }

    /// Parse a CSV file at the given `path`.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = fs::read_to_string(&path)?;
        csv::parser::parse_csv(&content)
    }

    /// Serialize this record to CSV and return the content as a `String`.
    pub fn to_csv(&self) -> Result<String, Error> {
        csv::writer::write_csv_content(self)
    }

    /// Serialize this record to a CSV file at the given `path`.
    ///
    /// Entries are written in their insertion order, binary values as upper case hex.
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        csv::writer::write_csv(self, path)
    }

    /// Returns the value of `field`, if present.
    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|entry| entry.field == field)
            .map(|entry| &entry.value)
    }

    /// Generate a sealed record image of exactly [`REGION_SIZE`] bytes in memory.
    pub fn generate_image(&self, fill: Fill) -> Result<Vec<u8>, Error> {
        record::generator::generate_image_data(self, fill)
    }

    /// Generate a sealed record image and write it to `path`.
    pub fn generate_image_file<P: AsRef<Path>>(&self, path: P, fill: Fill) -> Result<(), Error> {
        let data = self.generate_image(fill)?;
        fs::File::create(path)?.write_all(&data)?;
        Ok(())
    }

    /// Parse a record image from an in-memory byte slice.
    ///
    /// With `verify` set, images with a wrong checksum are rejected.
    pub fn parse_image(data: &[u8], verify: bool) -> Result<Self, Error> {
        record::parser::parse_image_data(data, verify)
    }

    /// Parse a record image file at the given `path`.
    pub fn parse_image_file<P: AsRef<Path>>(path: P, verify: bool) -> Result<Self, Error> {
        record::parser::parse_image(path, verify)
    }
}

/// Check checksum and definition flag of an image.
pub fn image_status(data: &[u8]) -> Result<ImageStatus, Error> {
    record::parser::image_status(data)
}

/// Check checksum and definition flag of an image file.
pub fn image_status_file<P: AsRef<Path>>(path: P) -> Result<ImageStatus, Error> {
    let data = fs::read(path)?;
    image_status(&data)
}
