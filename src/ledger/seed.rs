use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::record::{ProductType, Record, Status, Unit};

const SEED_DATE: (i32, u32, u32) = (2025, 7, 25);

// (product type, client, unit, quantity in hundredths, status)
const SEED_ROWS: [(ProductType, &str, Unit, i64, Status); 19] = [
    (ProductType::Logs, "Eucamad", Unit::St, 353149, Status::Ok),
    (ProductType::Logs, "GVP", Unit::St, 611891, Status::Ok),
    (ProductType::Logs, "Cezan", Unit::St, 254784, Status::Ok),
    (ProductType::Logs, "Italac", Unit::St, 177622, Status::Ok),
    (ProductType::Logs, "Cal Oeste", Unit::St, 263989, Status::Ok),
    (ProductType::Logs, "Plumatex", Unit::St, 121231, Status::Ok),
    (ProductType::Logs, "Machado", Unit::St, 166296, Status::Ok),
    (ProductType::Logs, "Miguel e Miguel", Unit::St, 14099, Status::Ok),
    (ProductType::Logs, "Ripack", Unit::St, 29233, Status::Ok),
    (ProductType::Chips, "Cereal", Unit::Tn, 576816, Status::Ok),
    (ProductType::Chips, "Cargill", Unit::Tn, 75913, Status::Verifying),
    (ProductType::Chips, "Bunge Rondonópolis", Unit::Tn, 137755, Status::Verifying),
    (ProductType::Chips, "Agra", Unit::M3, 89723, Status::Ok),
    (ProductType::Chips, "McCain", Unit::Tn, 44514, Status::Ok),
    (ProductType::Chips, "Bunge L.", Unit::Tn, 76457, Status::Ok),
    (ProductType::Chips, "Itambé", Unit::Tn, 9816, Status::Ok),
    (ProductType::Chips, "Ebba", Unit::Tn, 27612, Status::Ok),
    (ProductType::Chips, "Goiás Rendereng", Unit::Tn, 3412, Status::Ok),
    (ProductType::Firewood, "Cliente Lenha (exemplo)", Unit::St, 50000, Status::Ok),
];

/// The records every session starts from unless seeding is disabled.
pub fn seed_records() -> Vec<Record> {
    let (year, month, day) = SEED_DATE;
    let date = NaiveDate::from_ymd_opt(year, month, day).expect("Seed date is a valid date");
    SEED_ROWS
        .iter()
        .map(|&(product_type, client, unit, hundredths, status)| {
            Record::new(
                date,
                product_type,
                client,
                unit,
                Decimal::new(hundredths, 2).normalize(),
                status,
            )
        })
        .collect()
}
