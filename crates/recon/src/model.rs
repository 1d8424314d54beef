use serde::{Deserialize, Serialize};

use crate::config::JoinStrategy;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Short-term-rental revenue estimate for one submarket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueRecord {
    pub label: String,
    pub revenue: f64,
}

/// Long-term median rent for one submarket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentRecord {
    pub label: String,
    pub rent: f64,
}

impl RevenueRecord {
    pub fn new(label: impl Into<String>, revenue: f64) -> Self {
        Self { label: label.into(), revenue }
    }
}

impl RentRecord {
    pub fn new(label: impl Into<String>, rent: f64) -> Self {
        Self { label: label.into(), rent }
    }
}

/// Pre-loaded revenue and rent datasets.
#[derive(Debug, Clone, Default)]
pub struct MarketInput {
    pub revenue: Vec<RevenueRecord>,
    pub rent: Vec<RentRecord>,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A submarket that cleared the minimum revenue-to-rent multiple.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciledMarket {
    pub submarket: String,
    pub str_revenue: u64,
    pub median_rent: u64,
    pub multiple: f64,
}

/// How a revenue record found its rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    Exact,
    Fuzzy,
}

/// What happened to one revenue record during reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    Emitted { join: JoinKind },
    NoRent,
    NonPositiveRent { join: JoinKind },
    BelowThreshold { join: JoinKind, multiple: f64 },
}

impl RecordOutcome {
    pub fn join(&self) -> Option<JoinKind> {
        match self {
            Self::Emitted { join }
            | Self::NonPositiveRent { join }
            | Self::BelowThreshold { join, .. } => Some(*join),
            Self::NoRent => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub revenue_records: usize,
    pub rent_records: usize,
    pub exact_joins: usize,
    pub fuzzy_joins: usize,
    pub unmatched: usize,
    pub non_positive_rent: usize,
    pub below_threshold: usize,
    pub emitted: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub config_name: String,
    pub join_strategy: JoinStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_threshold: Option<f64>,
    pub min_multiple: f64,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub meta: ReportMeta,
    pub summary: ReconcileSummary,
    pub markets: Vec<ReconciledMarket>,
}
