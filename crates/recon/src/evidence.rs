use crate::model::{JoinKind, ReconcileSummary, RecordOutcome};

/// Tally per-record outcomes into run statistics.
pub fn compute_summary(outcomes: &[RecordOutcome], rent_records: usize) -> ReconcileSummary {
    let mut summary = ReconcileSummary {
        revenue_records: outcomes.len(),
        rent_records,
        ..ReconcileSummary::default()
    };

    for outcome in outcomes {
        match outcome.join() {
            Some(JoinKind::Exact) => summary.exact_joins += 1,
            Some(JoinKind::Fuzzy) => summary.fuzzy_joins += 1,
            None => {}
        }

        match outcome {
            RecordOutcome::Emitted { .. } => summary.emitted += 1,
            RecordOutcome::NoRent => summary.unmatched += 1,
            RecordOutcome::NonPositiveRent { .. } => summary.non_positive_rent += 1,
            RecordOutcome::BelowThreshold { .. } => summary.below_threshold += 1,
        }
    }

    summary
}
