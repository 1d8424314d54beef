//! Twelve-month expansion of annual market figures for export.

use chrono::Datelike;
use serde::Serialize;

use crate::model::ReconciledMarket;
use crate::random::RandomSource;

/// Revenue multiplier per calendar month, January first.
///
/// Summer (June to August) and December carry the 25-30% peak.
pub const SEASONAL_MULTIPLIERS: [f64; 12] = [
    0.85, 0.88, 0.95, 1.05, 1.15, 1.25, 1.30, 1.25, 1.10, 1.05, 1.20, 1.25,
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Bounds of the per-month rent jitter factor.
pub const RENT_JITTER: (f64, f64) = (0.95, 1.05);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRow {
    pub year: i32,
    pub submarket: String,
    pub month: &'static str,
    pub str_revenue: u64,
    pub median_rent: u64,
    pub multiple: f64,
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Expand each market into 12 monthly rows, submarket-major.
///
/// Revenue follows [`SEASONAL_MULTIPLIERS`]; rent gets an independent jitter
/// per row. The multiple is recomputed from the rounded monthly figures and is
/// 0 when the monthly rent rounds to 0.
pub fn expand_seasonal(
    markets: &[ReconciledMarket],
    year: Option<i32>,
    rng: &mut dyn RandomSource,
) -> Vec<MonthlyRow> {
    let year = year.unwrap_or_else(current_year);
    let mut rows = Vec::with_capacity(markets.len() * 12);

    for market in markets {
        for (month, factor) in MONTH_NAMES.into_iter().zip(SEASONAL_MULTIPLIERS) {
            let str_revenue = (market.str_revenue as f64 * factor).round() as u64;
            let median_rent =
                (market.median_rent as f64 * rng.uniform(RENT_JITTER.0, RENT_JITTER.1)).round() as u64;
            let multiple = if median_rent > 0 {
                str_revenue as f64 / median_rent as f64
            } else {
                0.0
            };

            rows.push(MonthlyRow {
                year,
                submarket: market.submarket.clone(),
                month,
                str_revenue,
                median_rent,
                multiple,
            });
        }
    }

    rows
}
