//! Sales aggregation and statistics.
//!
//! This module provides pure functions computing totals, rankings,
//! groupings and filters over a slice of loaded records. None of them
//! mutate their input.

use crate::models::{GameRecord, GenreSummary, PlatformAverage, Region, RegionTotals, YearSpan};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Default ranking size.
pub const DEFAULT_TOP_N: usize = 5;

/// Sum every sales field across all records.
pub fn totals_by_region(records: &[GameRecord]) -> RegionTotals {
    records
        .iter()
        .fold(RegionTotals::default(), |mut totals, record| {
            totals.na += record.sales_na;
            totals.eu += record.sales_eu;
            totals.jp += record.sales_jp;
            totals.other += record.sales_other;
            totals.global += record.sales_global;
            totals
        })
}

/// Get the top `n` `(name, sales)` pairs for a region key.
///
/// Unknown region keys rank every record at zero, so the result is then the
/// first `n` records in input order.
pub fn top_n_by_region(records: &[GameRecord], region: &str, n: usize) -> Vec<(String, f64)> {
    let region = Region::from_key(region);

    rank(records, n, |record| {
        region.map(|r| record.sales(r)).unwrap_or(0.0)
    })
}

/// Get the top `n` `(name, sales)` pairs for a region.
pub fn top_n(records: &[GameRecord], region: Region, n: usize) -> Vec<(String, f64)> {
    rank(records, n, |record| record.sales(region))
}

fn rank<F>(records: &[GameRecord], n: usize, value: F) -> Vec<(String, f64)>
where
    F: Fn(&GameRecord) -> f64,
{
    let mut ranking: Vec<(String, f64)> = records
        .iter()
        .map(|record| (record.name.clone(), value(record)))
        .collect();

    // Stable: ties keep input order
    ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranking.truncate(n);

    ranking
}

/// Group records by genre.
pub fn group_by_genre(records: &[GameRecord]) -> GenreSummary {
    let mut summary = GenreSummary::default();

    for record in records {
        summary.add(record);
    }

    summary
}

/// Compute mean global sales per platform, in first-occurrence order.
pub fn average_per_platform(records: &[GameRecord]) -> PlatformAverage {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();

    for record in records {
        let entry = sums.entry(record.platform.as_str()).or_insert_with(|| {
            order.push(record.platform.as_str());
            (0.0, 0)
        });
        entry.0 += record.sales_global;
        entry.1 += 1;
    }

    order
        .into_iter()
        .map(|platform| {
            let (total, count) = sums[platform];
            (platform.to_string(), total / count as f64)
        })
        .collect()
}

/// Platform averages sorted by average (highest first).
pub fn platforms_by_average(records: &[GameRecord]) -> PlatformAverage {
    let mut averages = average_per_platform(records);
    averages.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    averages
}

/// Records whose year lies in `start..=end`, in input order.
pub fn filter_by_year_range(records: &[GameRecord], start: i64, end: i64) -> Vec<&GameRecord> {
    records
        .iter()
        .filter(|record| (start..=end).contains(&record.year))
        .collect()
}

/// Earliest and latest year, or `None` for an empty collection.
pub fn year_span(records: &[GameRecord]) -> Option<YearSpan> {
    let min = records.iter().map(|r| r.year).min()?;
    let max = records.iter().map(|r| r.year).max()?;
    Some(YearSpan { min, max })
}
