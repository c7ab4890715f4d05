use csv::WriterBuilder;
use std::io::Write;

use crate::error::Result;
use crate::import::COLUMNS;
use crate::ledger::Record;

/// Writes records with the same six columns the importer reads.
pub fn write<'a>(writer: impl Write, records: impl IntoIterator<Item = &'a Record>) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record([
            record.date.format("%Y-%m-%d").to_string().as_str(),
            record.product_type_label(),
            record.client.as_str(),
            record.unit_label(),
            record.quantity.to_string().as_str(),
            record.status.label(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_bytes<'a>(records: impl IntoIterator<Item = &'a Record>) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write(&mut bytes, records)?;
    Ok(bytes)
}
