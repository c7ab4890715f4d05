use chrono::{Datelike as _, NaiveDate};
use std::fmt::{self, Display};

use super::record::{ProductType, Record};
use crate::error::{LedgerError, Result};

pub const MIN_YEAR: i32 = 2024;
pub const MAX_YEAR: i32 = 2100;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Selector values that mean "don't filter on this field".
const WILDCARDS: [&str; 2] = ["todos", "all"];

/// A calendar month, the primary filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LedgerError::validation(format!(
                "Year must be between {MIN_YEAR} and {MAX_YEAR}, got {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(LedgerError::validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month as usize - 1]
    }

    /// e.g. `jul (07)`
    pub fn month_label(&self) -> String {
        format!("{} ({:02})", self.month_abbreviation(), self.month)
    }

    /// e.g. `2025-07`
    pub fn file_stem(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month_label(), self.year)
    }
}

/// The active filter criteria. `None` is the wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub period: Period,
    pub product_type: Option<ProductType>,
    pub client: Option<String>,
}

impl Filter {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            product_type: None,
            client: None,
        }
    }

    pub fn with_product_type(mut self, product_type: Option<ProductType>) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn with_client(mut self, client: Option<String>) -> Self {
        self.client = client;
        self
    }

    pub fn matches(&self, record: &Record) -> bool {
        if !self.period.contains(record.date) {
            return false;
        }
        if let Some(product_type) = self.product_type {
            if record.product_type != Some(product_type) {
                return false;
            }
        }
        if let Some(client) = &self.client {
            if &record.client != client {
                return false;
            }
        }
        true
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} · {} · {}",
            self.period,
            self.product_type
                .as_ref()
                .map(ProductType::label)
                .unwrap_or("Todos"),
            self.client.as_deref().unwrap_or("Todos"),
        )
    }
}

fn is_wildcard(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    value.is_empty() || WILDCARDS.contains(&value.as_str())
}

/// Parses a Type selector value: a product type label or a wildcard.
pub fn parse_product_type_selector(value: &str) -> Result<Option<ProductType>> {
    if is_wildcard(value) {
        return Ok(None);
    }
    ProductType::from_label(value.trim())
        .map(Some)
        .ok_or_else(|| {
            LedgerError::validation(format!(
                "Unknown product type '{value}', expected one of: Todos, Toras, Cavaco, Lenha"
            ))
        })
}

/// Parses a Client selector value: a client name or a wildcard.
pub fn parse_client_selector(value: &str) -> Option<String> {
    if is_wildcard(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}
