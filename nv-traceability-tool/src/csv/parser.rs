use base64::Engine;

use crate::error::Error;
use crate::record::{Entry, Field, FieldValue};
use crate::TracabilityRecord;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    field: String,
    encoding: String,
    value: String,
}

/// Parse traceability CSV content from a string into a [`TracabilityRecord`].
pub(crate) fn parse_csv(content: &str) -> Result<TracabilityRecord, Error> {
    let mut record = TracabilityRecord { entries: vec![] };
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        record.entries.push(parse_row(row)?);
    }

    Ok(record)
}

fn parse_row(row: CsvRow) -> Result<Entry, Error> {
    let field: Field = row.field.trim().parse()?;
    if row.encoding.is_empty() {
        return Err(Error::InvalidEncoding(format!(
            "field {} must have an encoding",
            field
        )));
    }
    let value = parse_value(&row.value, &row.encoding)?;
    Ok(Entry::new(field, value))
}

fn parse_value(value: &str, encoding: &str) -> Result<FieldValue, Error> {
    match encoding {
        "u8" => parse_u8(value.trim()).map(FieldValue::U8),
        "string" => {
            if !value.is_ascii() {
                return Err(Error::InvalidValue(format!(
                    "string value '{}' is not ASCII",
                    value
                )));
            }
            Ok(FieldValue::String(value.to_string()))
        }
        "hex2bin" => {
            let bytes = hex::decode(value.trim())?;
            Ok(FieldValue::Binary(bytes))
        }
        "base64" => {
            let bytes = base64::engine::general_purpose::STANDARD.decode(value.trim())?;
            Ok(FieldValue::Binary(bytes))
        }
        _ => Err(Error::InvalidEncoding(encoding.to_string())),
    }
}

fn parse_u8(value: &str) -> Result<u8, Error> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => value.parse::<u8>(),
    };
    parsed.map_err(|e| Error::InvalidValue(format!("invalid u8 value '{}': {}", value, e)))
}
