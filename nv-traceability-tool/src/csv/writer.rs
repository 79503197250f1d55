use std::path::Path;

use csv::Writer;

use crate::error::Error;
use crate::TracabilityRecord;

/// Serialize a record to a CSV file at the given `output_path`.
///
/// Entries are written in their original insertion order. `Binary` values are serialized as
/// upper case hex.
pub(crate) fn write_csv<P: AsRef<Path>>(
    record: &TracabilityRecord,
    output_path: P,
) -> Result<(), Error> {
    let mut wtr = Writer::from_path(output_path)?;
    write_records(&mut wtr, record)
}

/// Serialize a record to CSV and return the content as a `String`.
pub(crate) fn write_csv_content(record: &TracabilityRecord) -> Result<String, Error> {
    let mut wtr = Writer::from_writer(Vec::new());
    write_records(&mut wtr, record)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| Error::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::InvalidValue(format!("CSV output is not valid UTF-8: {}", e)))
}

fn write_records<W: std::io::Write>(
    wtr: &mut Writer<W>,
    record: &TracabilityRecord,
) -> Result<(), Error> {
    wtr.write_record(["field", "encoding", "value"])?;

    for entry in &record.entries {
        wtr.write_record([
            entry.field.to_string().as_str(),
            entry.value.encoding_str(),
            entry.value.to_string().as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
