//! Reduction of operational rows into per-dimension totals.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use memp_entity::report::{FuelBucket, MachineryBucket};

/// Sum values per dimension key.
///
/// Rows may already be grouped by storage; repeated keys are summed all the
/// same. Keys without rows do not appear, and an empty input gives an empty
/// map. Accumulation is decimal, so many small entries do not drift.
pub fn aggregate<I>(rows: I) -> BTreeMap<String, Decimal>
where
    I: IntoIterator,
    I::Item: Into<(String, Decimal)>,
{
    rows.into_iter()
        .map(Into::into)
        .fold(BTreeMap::new(), |mut totals, (key, value)| {
            *totals.entry(key).or_insert(Decimal::ZERO) += value;
            totals
        })
}

/// Fuel buckets ordered by fuel type key.
pub fn fuel_buckets(totals: BTreeMap<String, Decimal>) -> Vec<FuelBucket> {
    totals
        .into_iter()
        .map(|(key, total)| FuelBucket {
            key,
            total: total.normalize(),
        })
        .collect()
}

/// Machinery buckets ordered by machinery name.
pub fn machinery_buckets(totals: BTreeMap<String, Decimal>) -> Vec<MachineryBucket> {
    totals
        .into_iter()
        .map(|(name, total)| MachineryBucket {
            name,
            total: total.normalize(),
        })
        .collect()
}
