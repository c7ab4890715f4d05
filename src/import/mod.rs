use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;
use std::io::Read;

mod date;
mod quantity;

pub use date::parse_date;
pub use quantity::coerce_quantity;

use crate::error::{LedgerError, Result};
use crate::ledger::{ProductType, Record, Status, Unit};

pub const COLUMNS: [&str; 6] = ["Data", "Tipo", "Cliente", "Unidade", "Quantidade", "Status"];

/// Positions of the known columns in the input header. Unknown columns are ignored.
#[derive(Debug, Default)]
struct ColumnSchema {
    date: Option<usize>,
    product_type: Option<usize>,
    client: Option<usize>,
    unit: Option<usize>,
    quantity: Option<usize>,
    status: Option<usize>,
}

impl ColumnSchema {
    fn from_header(header: &StringRecord) -> Self {
        let position = |name: &str| header.iter().position(|column| column == name);
        Self {
            date: position(COLUMNS[0]),
            product_type: position(COLUMNS[1]),
            client: position(COLUMNS[2]),
            unit: position(COLUMNS[3]),
            quantity: position(COLUMNS[4]),
            status: position(COLUMNS[5]),
        }
    }

    fn missing_columns(&self) -> Vec<&'static str> {
        [
            self.date,
            self.product_type,
            self.client,
            self.unit,
            self.quantity,
            self.status,
        ]
        .iter()
        .zip(COLUMNS)
        .filter(|(position, _)| position.is_none())
        .map(|(_, name)| name)
        .collect()
    }
}

/// Reads a CSV export and normalizes it into records.
///
/// Fails as a whole on malformed CSV, unparsable dates or unknown product types/units.
/// Missing columns get defaults (`today` for the date) and bad quantities or statuses are
/// coerced instead of failing.
pub fn load(input_stream: impl Read, today: NaiveDate) -> Result<Vec<Record>> {
    let content = read_content(input_stream)?;
    let mut reader = ReaderBuilder::new().from_reader(content.as_bytes());
    let header = reader
        .headers()
        .map_err(|err| LedgerError::import(format!("Failed to read header: {err}")))?
        .clone();
    let schema = ColumnSchema::from_header(&header);
    let missing = schema.missing_columns();
    if !missing.is_empty() {
        log::debug!("CSV is missing columns {:?}, using defaults", missing);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| LedgerError::import(format!("Malformed CSV: {err}")))?;
        let line = row.position().map(|position| position.line()).unwrap_or(0);
        let record = parse_row(&schema, &row, today)
            .map_err(|message| LedgerError::import(format!("Line {line}: {message}")))?;
        records.push(record);
    }
    log::debug!("Parsed {} record(s) from CSV", records.len());
    Ok(records)
}

fn read_content(mut input_stream: impl Read) -> Result<String> {
    let mut bytes = Vec::new();
    input_stream.read_to_end(&mut bytes)?;
    let content = String::from_utf8(bytes)
        .map_err(|_| LedgerError::import("File is not valid UTF-8"))?;
    Ok(maybe_remove_byte_order_mark(content))
}

fn maybe_remove_byte_order_mark(mut content: String) -> String {
    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }
    content
}

fn parse_row(
    schema: &ColumnSchema,
    row: &StringRecord,
    today: NaiveDate,
) -> std::result::Result<Record, String> {
    let cell = |position: Option<usize>| position.map(|position| row.get(position).unwrap_or(""));

    let date = match cell(schema.date) {
        Some(content) => {
            parse_date(content).ok_or_else(|| format!("Failed to parse date '{content}'"))?
        }
        None => today,
    };
    let product_type = match cell(schema.product_type).map(str::trim) {
        None | Some("") => None,
        Some(label) => Some(ProductType::from_label(label).ok_or_else(|| {
            format!("Unknown product type '{label}', expected one of: Toras, Cavaco, Lenha")
        })?),
    };
    let unit = match cell(schema.unit).map(str::trim) {
        None | Some("") => None,
        Some(label) => Some(
            Unit::from_label(label)
                .ok_or_else(|| format!("Unknown unit '{label}', expected one of: ST, TN, m3"))?,
        ),
    };
    let client = cell(schema.client).unwrap_or("").to_string();
    let quantity = cell(schema.quantity)
        .map(coerce_quantity)
        .unwrap_or(Decimal::ZERO);
    let status = cell(schema.status)
        .map(Status::normalize)
        .unwrap_or_default();

    Ok(Record {
        date,
        product_type,
        client,
        unit,
        quantity,
        status,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn import(content: &str) -> Result<Vec<Record>> {
        load(Cursor::new(content.as_bytes().to_vec()), today())
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn well_formed_rows() {
        let records = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,Toras,GVP,ST,6118.91,ok
2025-07-26,Cavaco,Cargill,TN,759.13,verificando
2025-07-27,Lenha,Cliente Lenha (exemplo),m3,500,ok
",
        )
        .unwrap();
        assert_eq!(
            vec![
                Record::new(
                    date(2025, 7, 25),
                    ProductType::Logs,
                    "GVP",
                    Unit::St,
                    Decimal::new(611891, 2),
                    Status::Ok
                ),
                Record::new(
                    date(2025, 7, 26),
                    ProductType::Chips,
                    "Cargill",
                    Unit::Tn,
                    Decimal::new(75913, 2),
                    Status::Verifying
                ),
                Record::new(
                    date(2025, 7, 27),
                    ProductType::Firewood,
                    "Cliente Lenha (exemplo)",
                    Unit::M3,
                    Decimal::new(500, 0),
                    Status::Ok
                ),
            ],
            records
        );
    }

    #[test]
    fn columns_in_other_order_and_extra_columns() {
        let records = import(
            "Status,Notes,Quantidade,Cliente,Data,Unidade,Tipo
verificando,whatever,12.5,Agra,2025-07-01,m3,Cavaco
",
        )
        .unwrap();
        assert_eq!(
            vec![Record::new(
                date(2025, 7, 1),
                ProductType::Chips,
                "Agra",
                Unit::M3,
                Decimal::new(125, 1),
                Status::Verifying
            )],
            records
        );
    }

    #[test]
    fn missing_columns_get_defaults() {
        let records = import("Cliente\nGVP\nCereal\n").unwrap();
        assert_eq!(2, records.len());
        for record in &records {
            assert_eq!(today(), record.date);
            assert_eq!(None, record.product_type);
            assert_eq!(None, record.unit);
            assert_eq!(Decimal::ZERO, record.quantity);
            assert_eq!(Status::Ok, record.status);
        }
        assert_eq!("Cereal", records[1].client);
    }

    #[test]
    fn missing_client_column_is_empty_string() {
        let records = import("Data,Quantidade\n2025-07-01,3\n").unwrap();
        assert_eq!("", records[0].client);
        assert_eq!(Decimal::new(3, 0), records[0].quantity);
    }

    #[test]
    fn non_numeric_quantity_is_zero() {
        let records = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,Toras,GVP,ST,abc,ok
",
        )
        .unwrap();
        assert_eq!(Decimal::ZERO, records[0].quantity);
    }

    #[test]
    fn unknown_status_is_ok() {
        let records = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,Toras,GVP,ST,1,VERIFICANDO
2025-07-25,Toras,GVP,ST,1,pending
2025-07-25,Toras,GVP,ST,1,
",
        )
        .unwrap();
        assert_eq!(
            vec![Status::Verifying, Status::Ok, Status::Ok],
            records.iter().map(|r| r.status).collect::<Vec<_>>()
        );
    }

    #[test]
    fn blank_type_and_unit_cells() {
        let records = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,,GVP,,1,ok
",
        )
        .unwrap();
        assert_eq!(None, records[0].product_type);
        assert_eq!(None, records[0].unit);
    }

    #[test]
    fn unparsable_date_fails_whole_import() {
        let err = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,Toras,GVP,ST,1,ok
not-a-date,Toras,GVP,ST,1,ok
",
        )
        .unwrap_err();
        assert!(err.is_import());
        assert!(err.to_string().contains("not-a-date"), "{err}");
        assert!(err.to_string().contains("Line 3"), "{err}");
    }

    #[test]
    fn empty_date_cell_fails() {
        let err = import("Data,Cliente\n,GVP\n").unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn unknown_product_type_fails() {
        let err = import("Data,Tipo\n2025-07-01,Madeira\n").unwrap_err();
        assert!(err.is_import());
        assert!(err.to_string().contains("Madeira"), "{err}");
    }

    #[test]
    fn unknown_unit_fails() {
        let err = import("Data,Unidade\n2025-07-01,kg\n").unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn ragged_rows_fail() {
        let err = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,Toras,GVP
",
        )
        .unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn invalid_utf8_fails() {
        let err = load(Cursor::new(vec![0xff, 0xfe, 0x00]), today()).unwrap_err();
        assert!(err.is_import());
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let records = import("\u{FEFF}Data,Cliente\n2025-07-01,GVP\n").unwrap();
        assert_eq!(date(2025, 7, 1), records[0].date);
        assert_eq!("GVP", records[0].client);
    }

    #[test]
    fn header_only_is_empty() {
        assert!(import("Data,Tipo,Cliente,Unidade,Quantidade,Status\n")
            .unwrap()
            .is_empty());
        assert!(import("").unwrap().is_empty());
    }

    #[test]
    fn quoted_fields() {
        let records = import(
            "Data,Tipo,Cliente,Unidade,Quantidade,Status
2025-07-25,Cavaco,\"Bunge, Rondonópolis\",TN,\"1377.55\",ok
",
        )
        .unwrap();
        assert_eq!("Bunge, Rondonópolis", records[0].client);
        assert_eq!(Decimal::new(137755, 2), records[0].quantity);
    }
}
