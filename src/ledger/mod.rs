use std::collections::BTreeSet;

mod filter;
mod record;
mod seed;

pub use filter::{
    parse_client_selector, parse_product_type_selector, Filter, Period, MAX_YEAR, MIN_YEAR,
};
pub use record::{ProductType, Record, Status, Unit, MAX_QUANTITY};
pub use seed::seed_records;

use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeSummary {
    pub removed: usize,
    pub inserted: usize,
}

/// Ordered collection of volume records. Records have no identity other than their position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<Record>,
}

impl Ledger {
    pub fn new_empty() -> Self {
        Self { records: vec![] }
    }

    pub fn new_seeded() -> Self {
        Self::from_records(seed_records())
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct client names, sorted.
    pub fn clients(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|record| record.client.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records matching `filter`, in ledger order.
    pub fn filter(&self, filter: &Filter) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    /// Replaces the records currently matching `filter` with `replacement`.
    ///
    /// Membership is decided by the filter predicate, not by identity. Records that don't match
    /// keep their relative order and `replacement` is appended after them.
    pub fn merge_back(&mut self, filter: &Filter, replacement: Vec<Record>) -> MergeSummary {
        let (in_view, remaining): (Vec<Record>, Vec<Record>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|record| filter.matches(record));
        let summary = MergeSummary {
            removed: in_view.len(),
            inserted: replacement.len(),
        };
        let mut merged = remaining;
        merged.extend(replacement);
        self.records = merged;
        log::info!(
            "Merged edits for {}: replaced {} record(s) with {}",
            filter,
            summary.removed,
            summary.inserted,
        );
        summary
    }

    /// Appends a manually entered record. The client name is trimmed and must not be empty.
    pub fn append(&mut self, mut record: Record) -> Result<()> {
        let client = record.client.trim();
        if client.is_empty() {
            return Err(LedgerError::validation("Informe o nome do cliente."));
        }
        record.client = client.to_string();
        self.records.push(record);
        Ok(())
    }

    /// Appends imported records as they are. No deduplication against existing records.
    pub fn extend(&mut self, records: Vec<Record>) -> usize {
        let count = records.len();
        self.records.extend(records);
        count
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn july_2025() -> Period {
        Period::new(2025, 7).unwrap()
    }

    fn record(
        date: (i32, u32, u32),
        product_type: ProductType,
        client: &str,
        quantity: i64,
    ) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            product_type,
            client,
            product_type.allowed_units()[0],
            Decimal::new(quantity, 0),
            Status::Ok,
        )
    }

    fn mixed_ledger() -> Ledger {
        Ledger::from_records(vec![
            record((2025, 6, 30), ProductType::Logs, "A", 1),
            record((2025, 7, 1), ProductType::Logs, "A", 2),
            record((2025, 7, 2), ProductType::Chips, "B", 3),
            record((2025, 7, 3), ProductType::Logs, "B", 4),
            record((2025, 8, 1), ProductType::Chips, "A", 5),
            record((2025, 7, 4), ProductType::Firewood, "C", 6),
        ])
    }

    fn sorted(records: &[Record]) -> Vec<Record> {
        let mut records = records.to_vec();
        records.sort_by(|a, b| {
            (a.date, a.product_type, &a.client, a.quantity)
                .cmp(&(b.date, b.product_type, &b.client, b.quantity))
        });
        records
    }

    #[test]
    fn filter_is_ordered_subset() {
        let ledger = mixed_ledger();
        let filter = Filter::new(july_2025());
        let filtered = ledger.filter(&filter);
        let quantities: Vec<_> = filtered.iter().map(|r| r.quantity).collect();
        assert_eq!(
            vec![
                Decimal::new(2, 0),
                Decimal::new(3, 0),
                Decimal::new(4, 0),
                Decimal::new(6, 0)
            ],
            quantities
        );
        assert!(filtered.iter().all(|r| filter.matches(r)));
    }

    #[test]
    fn filter_without_matches_is_empty() {
        let ledger = mixed_ledger();
        let filter = Filter::new(Period::new(2030, 1).unwrap());
        assert!(ledger.filter(&filter).is_empty());
    }

    #[test]
    fn seed_logs_for_july() {
        let ledger = Ledger::new_seeded();
        let filter = Filter::new(july_2025()).with_product_type(Some(ProductType::Logs));
        let filtered = ledger.filter(&filter);
        assert_eq!(9, filtered.len());
        assert_eq!(
            Decimal::new(1992294, 2),
            filtered.iter().map(|r| r.quantity).sum::<Decimal>()
        );
    }

    #[test]
    fn clients_are_distinct_and_sorted() {
        let ledger = mixed_ledger();
        assert_eq!(vec!["A", "B", "C"], ledger.clients());
    }

    #[test]
    fn merge_back_unchanged_replacement_is_identity_as_multiset() {
        let mut ledger = mixed_ledger();
        let original = ledger.clone();
        let filter = Filter::new(july_2025()).with_product_type(Some(ProductType::Logs));
        let replacement = ledger.filter(&filter).into_iter().cloned().collect();

        let summary = ledger.merge_back(&filter, replacement);

        assert_eq!(
            MergeSummary {
                removed: 2,
                inserted: 2
            },
            summary
        );
        assert_eq!(sorted(original.records()), sorted(ledger.records()));
    }

    #[test]
    fn merge_back_appends_replacement_after_remaining() {
        let mut ledger = mixed_ledger();
        let filter = Filter::new(july_2025()).with_client(Some("B".to_string()));
        let replacement = vec![record((2025, 7, 9), ProductType::Chips, "B", 30)];

        ledger.merge_back(&filter, replacement.clone());

        let quantities: Vec<_> = ledger.records().iter().map(|r| r.quantity).collect();
        assert_eq!(
            vec![
                Decimal::new(1, 0),
                Decimal::new(2, 0),
                Decimal::new(5, 0),
                Decimal::new(6, 0),
                Decimal::new(30, 0)
            ],
            quantities
        );
    }

    #[test]
    fn merge_back_removes_dropped_row_only() {
        let mut ledger = Ledger::new_seeded();
        let original = ledger.clone();
        let filter = Filter::new(july_2025()).with_product_type(Some(ProductType::Chips));
        let mut replacement: Vec<Record> = ledger.filter(&filter).into_iter().cloned().collect();
        let dropped = replacement.remove(3);
        assert_eq!("Agra", dropped.client);

        ledger.merge_back(&filter, replacement);

        assert_eq!(original.len() - 1, ledger.len());
        let mut expected = original.records().to_vec();
        let position = expected.iter().position(|r| r == &dropped).unwrap();
        expected.remove(position);
        assert_eq!(sorted(&expected), sorted(ledger.records()));
        assert!(!ledger.records().contains(&dropped));
    }

    #[test]
    fn merge_back_keeps_edited_row_that_leaves_the_view() {
        let mut ledger = mixed_ledger();
        let filter = Filter::new(july_2025()).with_product_type(Some(ProductType::Chips));
        let mut edited: Vec<Record> = ledger.filter(&filter).into_iter().cloned().collect();
        edited[0].product_type = Some(ProductType::Logs);

        ledger.merge_back(&filter, edited.clone());

        assert_eq!(6, ledger.len());
        assert_eq!(&edited[0], ledger.records().last().unwrap());
        assert!(ledger.filter(&filter).is_empty());
    }

    #[test]
    fn merge_back_with_empty_view_only_appends() {
        let mut ledger = mixed_ledger();
        let filter = Filter::new(Period::new(2026, 1).unwrap());
        let new = record((2026, 1, 5), ProductType::Logs, "D", 7);

        let summary = ledger.merge_back(&filter, vec![new.clone()]);

        assert_eq!(0, summary.removed);
        assert_eq!(7, ledger.len());
        assert_eq!(&new, ledger.records().last().unwrap());
    }

    #[test]
    fn append_trims_client() {
        let mut ledger = Ledger::new_empty();
        ledger
            .append(record((2025, 7, 1), ProductType::Logs, "  GVP ", 1))
            .unwrap();
        assert_eq!("GVP", ledger.records()[0].client);
    }

    #[test]
    fn append_rejects_empty_client() {
        let mut ledger = mixed_ledger();
        let before = ledger.clone();
        let err = ledger
            .append(record((2025, 7, 1), ProductType::Logs, "   ", 1))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(before, ledger);
    }

    #[test]
    fn extend_allows_duplicates() {
        let mut ledger = mixed_ledger();
        let duplicate = ledger.records()[0].clone();
        assert_eq!(2, ledger.extend(vec![duplicate.clone(), duplicate.clone()]));
        assert_eq!(8, ledger.len());
        assert_eq!(&duplicate, &ledger.records()[7]);
    }
}
