use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{hash_map::Entry, HashMap};
use std::hash::Hash;

use crate::error::{LedgerError, Result};
use crate::ledger::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccumulatedPoint {
    pub date: NaiveDate,
    pub quantity: Decimal,
    pub cumulative: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientTotal {
    pub client: String,
    pub total: Decimal,
}

/// Running total of quantities in date order, one point per record.
pub fn accumulate<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<Vec<AccumulatedPoint>> {
    let mut records: Vec<&Record> = records.into_iter().collect();
    // sort_by_key is stable, records on the same date keep their order
    records.sort_by_key(|record| record.date);
    let mut cumulative = Decimal::ZERO;
    records
        .into_iter()
        .map(|record| -> Result<AccumulatedPoint> {
            cumulative = checked_add(cumulative, record.quantity)?;
            Ok(AccumulatedPoint {
                date: record.date,
                quantity: record.quantity,
                cumulative,
            })
        })
        .collect()
}

/// Total quantity per client, largest first. Equal totals are ordered by client name.
pub fn rank_by_client<'a>(
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<Vec<ClientTotal>> {
    let grouped = group_by(
        records.into_iter(),
        |record| record.client.clone(),
        |record| std::iter::once(record.quantity),
    );
    let mut ranking = grouped
        .into_iter()
        .map(|(client, quantities)| -> Result<ClientTotal> {
            Ok(ClientTotal {
                client,
                total: checked_sum(quantities)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    ranking.sort_by(ranking_order);
    Ok(ranking)
}

/// Ordering of ranking rows: total descending, then client name ascending.
pub fn ranking_order(a: &ClientTotal, b: &ClientTotal) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| a.client.cmp(&b.client))
}

pub fn total_quantity<'a>(records: impl IntoIterator<Item = &'a Record>) -> Result<Decimal> {
    checked_sum(records.into_iter().map(|record| record.quantity))
}

fn checked_sum(quantities: impl IntoIterator<Item = Decimal>) -> Result<Decimal> {
    quantities
        .into_iter()
        .try_fold(Decimal::ZERO, checked_add)
}

fn checked_add(sum: Decimal, quantity: Decimal) -> Result<Decimal> {
    sum.checked_add(quantity).ok_or(LedgerError::Overflow)
}

fn group_by<T, K, V, IV>(
    items: impl Iterator<Item = T>,
    key_fn: impl Fn(&T) -> K,
    value_fn: impl Fn(T) -> IV,
) -> HashMap<K, Vec<V>>
where
    K: PartialEq + Eq + Hash,
    IV: Iterator<Item = V>,
{
    let mut grouped: HashMap<K, Vec<V>> = HashMap::new();
    for item in items {
        let key = key_fn(&item);
        match grouped.entry(key) {
            Entry::Occupied(mut grouped) => {
                grouped.get_mut().extend(value_fn(item));
            }
            Entry::Vacant(grouped) => {
                grouped.insert(value_fn(item).collect());
            }
        }
    }
    grouped
}
