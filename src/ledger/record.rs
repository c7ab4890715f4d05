use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProductType {
    Logs,
    Chips,
    Firewood,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [ProductType::Logs, ProductType::Chips, ProductType::Firewood];

    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Logs => "Toras",
            ProductType::Chips => "Cavaco",
            ProductType::Firewood => "Lenha",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Toras" => Some(ProductType::Logs),
            "Cavaco" => Some(ProductType::Chips),
            "Lenha" => Some(ProductType::Firewood),
            _ => None,
        }
    }

    /// Units offered by the add-form for this product type. The first one is the default.
    pub fn allowed_units(&self) -> &'static [Unit] {
        match self {
            ProductType::Logs => &[Unit::St],
            ProductType::Chips => &[Unit::Tn, Unit::M3],
            ProductType::Firewood => &[Unit::St, Unit::M3, Unit::Tn],
        }
    }
}

impl Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    St,
    Tn,
    M3,
}

impl Unit {
    pub const ALL: [Unit; 3] = [Unit::St, Unit::Tn, Unit::M3];

    pub fn label(&self) -> &'static str {
        match self {
            Unit::St => "ST",
            Unit::Tn => "TN",
            Unit::M3 => "m3",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ST" => Some(Unit::St),
            "TN" => Some(Unit::Tn),
            "m3" => Some(Unit::M3),
            _ => None,
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Ok,
    Verifying,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Ok, Status::Verifying];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Verifying => "verificando",
        }
    }

    /// Lenient: case and surrounding whitespace are ignored and anything unknown is `Ok`.
    pub fn normalize(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "verificando" => Status::Verifying,
            _ => Status::Ok,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Largest quantity a single record holds. Imported values above it are capped.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// One shipment-volume entry.
///
/// `product_type` and `unit` are `None` when they were blank in an imported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub date: NaiveDate,
    pub product_type: Option<ProductType>,
    pub client: String,
    pub unit: Option<Unit>,
    pub quantity: Decimal,
    pub status: Status,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        product_type: ProductType,
        client: impl Into<String>,
        unit: Unit,
        quantity: Decimal,
        status: Status,
    ) -> Self {
        Self {
            date,
            product_type: Some(product_type),
            client: client.into(),
            unit: Some(unit),
            quantity,
            status,
        }
    }

    pub fn product_type_label(&self) -> &'static str {
        self.product_type.as_ref().map(ProductType::label).unwrap_or("")
    }

    pub fn unit_label(&self) -> &'static str {
        self.unit.as_ref().map(Unit::label).unwrap_or("")
    }
}
