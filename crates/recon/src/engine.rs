use crate::config::{JoinStrategy, MarketConfig, DEFAULT_MATCH_THRESHOLD, DEFAULT_MIN_MULTIPLE};
use crate::error::MarketError;
use crate::evidence::compute_summary;
use crate::matcher::RentIndex;
use crate::model::{
    JoinKind, MarketInput, MarketReport, ReconciledMarket, RecordOutcome, RentRecord, ReportMeta,
    RevenueRecord,
};
use crate::random::RandomSource;

/// Base uplift applied to raw STR revenue before jitter.
pub const REALISM_UPLIFT: f64 = 1.1;
/// Half-width of the uniform jitter around [`REALISM_UPLIFT`].
pub const REALISM_JITTER: f64 = 0.075;

#[derive(Debug, Clone, Copy)]
pub struct ReconcileOptions {
    pub min_multiple: f64,
    pub join: JoinStrategy,
    pub match_threshold: f64,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            min_multiple: DEFAULT_MIN_MULTIPLE,
            join: JoinStrategy::ExactKey,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

impl From<&MarketConfig> for ReconcileOptions {
    fn from(config: &MarketConfig) -> Self {
        Self {
            min_multiple: config.min_multiple,
            join: config.join.strategy,
            match_threshold: config.join.threshold,
        }
    }
}

/// Markets plus one outcome per revenue record, in input order.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub markets: Vec<ReconciledMarket>,
    pub outcomes: Vec<RecordOutcome>,
}

/// Join revenue to rent by exact key, keep multiples `>= min_multiple`,
/// sorted by multiple descending.
pub fn reconcile(
    str_data: &[RevenueRecord],
    rent_data: &[RentRecord],
    min_multiple: f64,
    rng: &mut dyn RandomSource,
) -> Vec<ReconciledMarket> {
    let options = ReconcileOptions {
        min_multiple,
        ..ReconcileOptions::default()
    };
    reconcile_with(str_data, rent_data, &options, rng).markets
}

/// [`reconcile`] with a configurable join strategy, also reporting why each
/// record was kept or dropped.
pub fn reconcile_with(
    str_data: &[RevenueRecord],
    rent_data: &[RentRecord],
    options: &ReconcileOptions,
    rng: &mut dyn RandomSource,
) -> Reconciliation {
    let index = RentIndex::build(rent_data);
    let mut markets = Vec::new();
    let mut outcomes = Vec::with_capacity(str_data.len());

    for record in str_data {
        let Some(found) = index.lookup(&record.label, options.join, options.match_threshold) else {
            log::debug!("'{}': no rent match", record.label);
            outcomes.push(RecordOutcome::NoRent);
            continue;
        };

        // NaN fails this comparison too; rent must survive rounding to the output
        if !(found.rent.is_finite() && found.rent.round() >= 1.0) {
            log::debug!("'{}': rent {} rounds below 1, skipped", record.label, found.rent);
            outcomes.push(RecordOutcome::NonPositiveRent { join: found.kind });
            continue;
        }

        if found.kind == JoinKind::Fuzzy {
            log::debug!(
                "'{}' joined to '{}' (similarity {:.3})",
                record.label,
                found.rent_label,
                found.similarity
            );
        }

        let factor = REALISM_UPLIFT + rng.uniform(-REALISM_JITTER, REALISM_JITTER);
        let adjusted = sanitize_revenue(record.revenue) * factor;
        let multiple = adjusted / found.rent;

        // a NaN cutoff keeps nothing
        if !(multiple >= options.min_multiple) {
            log::debug!(
                "'{}': multiple {:.2} below {:.2}",
                record.label,
                multiple,
                options.min_multiple
            );
            outcomes.push(RecordOutcome::BelowThreshold { join: found.kind, multiple });
            continue;
        }

        markets.push(ReconciledMarket {
            submarket: record.label.clone(),
            str_revenue: adjusted.round() as u64,
            median_rent: found.rent.round() as u64,
            multiple,
        });
        outcomes.push(RecordOutcome::Emitted { join: found.kind });
    }

    // stable: equal multiples keep input order
    markets.sort_by(|a, b| b.multiple.total_cmp(&a.multiple));

    Reconciliation { markets, outcomes }
}

/// Negative, NaN and infinite revenue count as zero.
fn sanitize_revenue(revenue: f64) -> f64 {
    if revenue.is_finite() && revenue > 0.0 {
        revenue
    } else {
        0.0
    }
}

/// Run a reconciliation per config. Returns markets + summary + metadata.
pub fn run(config: &MarketConfig, input: &MarketInput, rng: &mut dyn RandomSource) -> MarketReport {
    let options = ReconcileOptions::from(config);
    let result = reconcile_with(&input.revenue, &input.rent, &options, rng);
    let summary = compute_summary(&result.outcomes, input.rent.len());

    log::info!(
        "{}: {} revenue / {} rent records -> {} markets ({} exact, {} fuzzy, {} unmatched, {} below {:.2}x)",
        config.name,
        summary.revenue_records,
        summary.rent_records,
        summary.emitted,
        summary.exact_joins,
        summary.fuzzy_joins,
        summary.unmatched,
        summary.below_threshold,
        options.min_multiple,
    );

    MarketReport {
        meta: ReportMeta {
            config_name: config.name.clone(),
            join_strategy: options.join,
            match_threshold: match options.join {
                JoinStrategy::Fuzzy => Some(options.match_threshold),
                JoinStrategy::ExactKey => None,
            },
            min_multiple: options.min_multiple,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        markets: result.markets,
    }
}

// ---------------------------------------------------------------------------
// CSV loading
// ---------------------------------------------------------------------------

/// Read `(label, value)` pairs from a CSV with headers.
///
/// Values may carry `$`, thousands separators or padding. Unparseable values
/// become NaN and are excluded later by the reconciliation rules. Rows with an
/// empty label, or too short to reach the label or value column, are dropped.
pub fn load_csv_pairs(
    source: &str,
    csv_data: &str,
    label_column: &str,
    value_column: &str,
) -> Result<Vec<(String, f64)>, MarketError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let idx = |name: &str| -> Result<usize, MarketError> {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| MarketError::MissingColumn {
                source: source.into(),
                column: name.into(),
            })
    };

    let label_idx = idx(label_column)?;
    let value_idx = idx(value_column)?;

    let mut pairs = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let row = line + 2;
        let (Some(label), Some(raw)) = (record.get(label_idx), record.get(value_idx)) else {
            log::warn!("{source}: row {row} has {} fields, skipped", record.len());
            continue;
        };

        let label = label.trim();
        if label.is_empty() {
            log::debug!("{source}: row {row} has no label, skipped");
            continue;
        }

        let value = parse_amount(raw).unwrap_or_else(|| {
            log::warn!("{source}: cannot parse value '{raw}' for '{label}'");
            f64::NAN
        });
        pairs.push((label.to_string(), value));
    }

    Ok(pairs)
}

pub fn load_revenue_csv(
    csv_data: &str,
    label_column: &str,
    value_column: &str,
) -> Result<Vec<RevenueRecord>, MarketError> {
    Ok(load_csv_pairs("revenue", csv_data, label_column, value_column)?
        .into_iter()
        .map(|(label, revenue)| RevenueRecord { label, revenue })
        .collect())
}

pub fn load_rent_csv(
    csv_data: &str,
    label_column: &str,
    value_column: &str,
) -> Result<Vec<RentRecord>, MarketError> {
    Ok(load_csv_pairs("rent", csv_data, label_column, value_column)?
        .into_iter()
        .map(|(label, rent)| RentRecord { label, rent })
        .collect())
}

/// Load both inputs named by the config, resolving paths against `base_dir`.
pub fn load_inputs(config: &MarketConfig, base_dir: &std::path::Path) -> Result<MarketInput, MarketError> {
    let inputs = config.inputs()?;

    let read = |file: &str| -> Result<String, MarketError> {
        let path = base_dir.join(file);
        std::fs::read_to_string(&path)
            .map_err(|e| MarketError::Io(format!("cannot read {}: {e}", path.display())))
    };

    let revenue = load_revenue_csv(
        &read(&inputs.revenue.file)?,
        &inputs.revenue.label,
        inputs.revenue.value_column("revenue"),
    )?;
    let rent = load_rent_csv(
        &read(&inputs.rent.file)?,
        &inputs.rent.label,
        inputs.rent.value_column("rent"),
    )?;

    Ok(MarketInput { revenue, rent })
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}
