//! `strm run` / `strm reconcile` / `strm validate`: revenue-to-rent reconciliation.

use std::path::{Path, PathBuf};

use serde::Serialize;
use strmarket_recon::engine::{load_inputs, load_rent_csv, load_revenue_csv};
use strmarket_recon::export::{annual_csv_string, monthly_csv_string};
use strmarket_recon::random::source_for_seed;
use strmarket_recon::{
    expand_seasonal, run, JoinStrategy, MarketConfig, MarketInput, MarketReport, MonthlyRow,
};

use crate::{CliError, OutputFormat};

/// Where and how results are written.
pub struct Emit {
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub monthly: bool,
    /// Overrides `[seasonal].year`.
    pub year: Option<i32>,
    pub fail_on_empty: bool,
    pub quiet: bool,
}

/// Ad-hoc reconciliation inputs (no config file).
pub struct ReconcileArgs {
    pub revenue: PathBuf,
    pub rent: PathBuf,
    /// (label, value) column names
    pub revenue_columns: (String, String),
    pub rent_columns: (String, String),
    pub min_multiple: f64,
    pub join: JoinStrategy,
    pub threshold: f64,
    pub seed: Option<u64>,
}

#[derive(Serialize)]
struct RunOutput<'a> {
    #[serde(flatten)]
    report: &'a MarketReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    monthly: Option<&'a [MonthlyRow]>,
}

fn read_config(config_path: &Path) -> Result<MarketConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| {
        CliError::input(format!("cannot read config {}: {e}", config_path.display()))
    })?;
    MarketConfig::from_toml(&config_str).map_err(CliError::market)
}

pub fn cmd_run(config_path: PathBuf, emit: Emit) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    // Resolve input paths relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    log::debug!("resolving inputs against {}", base_dir.display());
    let input = load_inputs(&config, base_dir).map_err(CliError::market)?;

    execute(&config, &input, emit)
}

pub fn cmd_reconcile(args: ReconcileArgs, emit: Emit) -> Result<(), CliError> {
    let mut config = MarketConfig {
        name: args
            .revenue
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "market".into()),
        min_multiple: args.min_multiple,
        seed: args.seed,
        ..MarketConfig::default()
    };
    config.join.strategy = args.join;
    config.join.threshold = args.threshold;
    config.validate().map_err(|e| CliError::args(e.to_string()))?;

    let read = |path: &Path| -> Result<String, CliError> {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::input(format!("cannot read {}: {e}", path.display())))
    };

    let revenue = load_revenue_csv(&read(&args.revenue)?, &args.revenue_columns.0, &args.revenue_columns.1)
        .map_err(CliError::market)?;
    let rent = load_rent_csv(&read(&args.rent)?, &args.rent_columns.0, &args.rent_columns.1)
        .map_err(CliError::market)?;

    execute(&config, &MarketInput { revenue, rent }, emit)
}

fn execute(config: &MarketConfig, input: &MarketInput, emit: Emit) -> Result<(), CliError> {
    let mut rng = source_for_seed(config.seed);
    log::debug!(
        "{}: {} revenue rows, {} rent rows, seed {:?}",
        config.name,
        input.revenue.len(),
        input.rent.len(),
        config.seed,
    );
    let report = run(config, input, rng.as_mut());

    let monthly = if emit.monthly {
        let year = emit.year.or(config.seasonal.year);
        Some(expand_seasonal(&report.markets, year, rng.as_mut()))
    } else {
        None
    };

    let rendered = match emit.format {
        OutputFormat::Json => {
            let out = RunOutput { report: &report, monthly: monthly.as_deref() };
            let mut json = serde_json::to_string_pretty(&out)
                .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
            json.push('\n');
            json
        }
        OutputFormat::Csv => {
            let csv = match monthly {
                Some(ref rows) => monthly_csv_string(rows),
                None => annual_csv_string(&report.markets),
            };
            csv.map_err(CliError::market)?
        }
    };

    match emit.output {
        Some(ref path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            if !emit.quiet {
                eprintln!("wrote {}", path.display());
            }
        }
        None => print!("{rendered}"),
    }

    // Human summary to stderr
    let s = &report.summary;
    if !emit.quiet {
        eprintln!(
            "{}: {} of {} submarkets at or above {:.2}x ({} exact, {} fuzzy, {} unmatched, {} without usable rent)",
            config.name,
            s.emitted,
            s.revenue_records,
            config.min_multiple,
            s.exact_joins,
            s.fuzzy_joins,
            s.unmatched,
            s.non_positive_rent,
        );
    }

    if emit.fail_on_empty && report.markets.is_empty() {
        let err = CliError::empty(format!("no submarket reached {:.2}x", config.min_multiple));
        return Err(match config.join.strategy {
            JoinStrategy::ExactKey if s.unmatched > 0 => {
                err.with_hint("labels may differ between sources; try --join fuzzy")
            }
            _ => err,
        });
    }

    Ok(())
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    let inputs = match config.inputs {
        Some(ref inputs) => format!("inputs {} + {}", inputs.revenue.file, inputs.rent.file),
        None => "no inputs".to_string(),
    };
    eprintln!(
        "valid: '{}' ({} join, min {:.2}x, {})",
        config.name, config.join.strategy, config.min_multiple, inputs,
    );
    Ok(())
}
