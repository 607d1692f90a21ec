//! Spend aggregation over loaded tabs.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::data::OrderRecord;
use crate::source::DataSource;
use crate::types::SourceName;

/// Spend of one tab on one day, checked against its limit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailySpend {
    /// Tab name.
    pub source: SourceName,
    /// Day totalled.
    pub date: NaiveDate,
    /// Sum of values, in BRL.
    pub total: f64,
    /// Records dated on the day.
    pub count: usize,
    /// Configured limit, if any.
    pub limit: Option<f64>,
    /// True when `total` is strictly above `limit`.
    pub exceeded: bool,
}

/// Total spend of one requesting unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UnitTotal {
    /// Trimmed unit name; empty for blank units.
    pub unit: String,
    /// Sum of values, in BRL.
    pub total: f64,
    /// Records counted.
    pub count: usize,
}

/// Records of `source` dated `date`.
pub fn records_on<'a>(source: &'a dyn DataSource, date: NaiveDate) -> Vec<&'a OrderRecord> {
    source
        .records()
        .iter()
        .filter(|record| record.date == Some(date))
        .collect()
}

/// Spend of `source` on `date`, compared with `limit` when one is set.
pub fn daily_spend(source: &dyn DataSource, date: NaiveDate, limit: Option<f64>) -> DailySpend {
    let records = records_on(source, date);
    let total: f64 = records.iter().map(|record| record.value).sum();
    DailySpend {
        source: source.name().to_string(),
        date,
        total,
        count: records.len(),
        limit,
        exceeded: limit.is_some_and(|limit| total > limit),
    }
}

/// Combined total and record count over several tabs' spend for the day.
pub fn combined_total(spends: &[DailySpend]) -> (f64, usize) {
    spends
        .iter()
        .fold((0.0, 0), |(total, count), spend| (total + spend.total, count + spend.count))
}

/// Sum of values dated within `start..=end`. Undated records are skipped.
pub fn sum_between(records: &[OrderRecord], start: NaiveDate, end: NaiveDate) -> f64 {
    records
        .iter()
        .filter(|record| record.date.is_some_and(|date| start <= date && date <= end))
        .map(|record| record.value)
        .sum()
}

/// The `n` largest records by value, ties broken by identifier.
pub fn top_by_value<'a, I>(records: I, n: usize) -> Vec<&'a OrderRecord>
where
    I: IntoIterator<Item = &'a OrderRecord>,
{
    let mut sorted: Vec<&OrderRecord> = records.into_iter().collect();
    sorted.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.identifier.cmp(&b.identifier))
    });
    sorted.truncate(n);
    sorted
}

/// Per-unit totals for records dated within `start..=end`, largest first.
///
/// Blank units are grouped under an empty name.
pub fn rank_by_unit(records: &[OrderRecord], start: NaiveDate, end: NaiveDate) -> Vec<UnitTotal> {
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in records {
        if !record.date.is_some_and(|date| start <= date && date <= end) {
            continue;
        }
        let entry = totals.entry(record.unit.trim()).or_insert((0.0, 0));
        entry.0 += record.value;
        entry.1 += 1;
    }
    let mut ranked: Vec<UnitTotal> = totals
        .into_iter()
        .map(|(unit, (total, count))| UnitTotal {
            unit: unit.to_string(),
            total,
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.unit.cmp(&b.unit)));
    ranked
}

/// Monday..Sunday of the week containing `today`.
pub fn current_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}
