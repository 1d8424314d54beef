// strmarket CLI - submarket label matching and revenue-to-rent reconciliation

mod exit_codes;
mod market;
mod matching;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use exit_codes::{market_exit_code, EXIT_EMPTY_RESULT, EXIT_ERROR, EXIT_INPUT, EXIT_SUCCESS, EXIT_USAGE};
use market::{Emit, ReconcileArgs};
use strmarket_recon::JoinStrategy;

#[derive(Parser)]
#[command(name = "strm")]
#[command(about = "Match submarket names and rank short-term rental revenue against long-term rent")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Log debug detail (skipped records, fuzzy joins) to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a reconciliation described by a TOML config file
    #[command(after_help = "\
Examples:
  strm run sandiego.market.toml
  strm run sandiego.market.toml --json
  strm run sandiego.market.toml --monthly --output monthly.csv")]
    Run {
        /// Path to the .market.toml config file
        config: PathBuf,

        /// Emit the JSON report instead of CSV
        #[arg(long)]
        json: bool,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Expand each market into 12 seasonal monthly rows
        #[arg(long)]
        monthly: bool,

        /// Exit 5 when no market clears the minimum multiple
        #[arg(long)]
        fail_on_empty: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Reconcile two CSV files without a config file
    #[command(after_help = "\
Examples:
  strm reconcile --revenue airdna.csv --rent rentcast.csv
  strm reconcile --revenue airdna.csv --rent rentcast.csv --join fuzzy --threshold 0.7
  strm reconcile --revenue airdna.csv --rent rentcast.csv --min-multiple 2.5 --format json
  strm reconcile --revenue airdna.csv --rent rentcast.csv --monthly --year 2026 --seed 7")]
    Reconcile(ReconcileCli),

    /// Find the candidate most similar to a target label
    #[command(after_help = "\
Exit code 5 means no candidate reached the threshold.

Examples:
  strm match Hillcrest Hillcrest 'Hillcrest Heights' 'La Jolla'
  strm match 'mission bch' 'Mission Beach' 'Ocean Beach' --threshold 0.5 --json")]
    Match {
        /// Label to look up
        target: String,

        /// Candidate labels, scanned in order
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Minimum similarity to accept (0-1)
        #[arg(long, default_value_t = strmarket_match::DEFAULT_MATCH_THRESHOLD)]
        threshold: f64,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the similarity score of two labels
    Similarity {
        a: String,
        b: String,
    },

    /// Validate a config file without running it
    Validate {
        /// Path to the .market.toml config file
        config: PathBuf,
    },
}

#[derive(clap::Args)]
struct ReconcileCli {
    /// STR revenue CSV
    #[arg(long)]
    revenue: PathBuf,

    /// Long-term rent CSV
    #[arg(long)]
    rent: PathBuf,

    /// Label column in the revenue CSV
    #[arg(long, default_value = "submarket")]
    revenue_label: String,

    /// Value column in the revenue CSV
    #[arg(long, default_value = "revenue")]
    revenue_value: String,

    /// Label column in the rent CSV
    #[arg(long, default_value = "submarket")]
    rent_label: String,

    /// Value column in the rent CSV
    #[arg(long, default_value = "rent")]
    rent_value: String,

    /// Minimum revenue-to-rent multiple to keep a submarket
    #[arg(long, default_value_t = strmarket_recon::config::DEFAULT_MIN_MULTIPLE)]
    min_multiple: f64,

    /// How revenue labels are joined to rent labels
    #[arg(long, value_enum, default_value_t = JoinArg::ExactKey)]
    join: JoinArg,

    /// Minimum similarity for fuzzy joins (0-1)
    #[arg(long, default_value_t = strmarket_match::DEFAULT_MATCH_THRESHOLD)]
    threshold: f64,

    /// Seed the jitter for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Expand each market into 12 seasonal monthly rows
    #[arg(long)]
    monthly: bool,

    /// Year stamped on monthly rows (default: current year)
    #[arg(long, requires = "monthly")]
    year: Option<i32>,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Exit 5 when no market clears the minimum multiple
    #[arg(long)]
    fail_on_empty: bool,

    /// Suppress the stderr summary
    #[arg(long, short = 'q')]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum JoinArg {
    ExactKey,
    Fuzzy,
}

impl From<JoinArg> for JoinStrategy {
    fn from(arg: JoinArg) -> Self {
        match arg {
            JoinArg::ExactKey => JoinStrategy::ExactKey,
            JoinArg::Fuzzy => JoinStrategy::Fuzzy,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: strm <command> [options]");
            eprintln!("       strm --help for more information");
            Ok(())
        }
        Some(Commands::Run { config, json, output, monthly, fail_on_empty, quiet }) => {
            let format = if json { OutputFormat::Json } else { OutputFormat::Csv };
            market::cmd_run(config, Emit { format, output, monthly, year: None, fail_on_empty, quiet })
        }
        Some(Commands::Reconcile(args)) => market::cmd_reconcile(
            ReconcileArgs {
                revenue: args.revenue,
                rent: args.rent,
                revenue_columns: (args.revenue_label, args.revenue_value),
                rent_columns: (args.rent_label, args.rent_value),
                min_multiple: args.min_multiple,
                join: args.join.into(),
                threshold: args.threshold,
                seed: args.seed,
            },
            Emit {
                format: args.format,
                output: args.output,
                monthly: args.monthly,
                year: args.year,
                fail_on_empty: args.fail_on_empty,
                quiet: args.quiet,
            },
        ),
        Some(Commands::Match { target, candidates, threshold, json }) => {
            matching::cmd_match(&target, &candidates, threshold, json)
        }
        Some(Commands::Similarity { a, b }) => matching::cmd_similarity(&a, &b),
        Some(Commands::Validate { config }) => market::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// No match / no market. Message may be empty when stdout already says so.
    pub fn empty(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EMPTY_RESULT, message: msg.into(), hint: None }
    }

    pub fn market(err: strmarket_recon::MarketError) -> Self {
        let hint = match &err {
            strmarket_recon::MarketError::MissingColumn { .. } => {
                Some("set the column names in [inputs.*] or with --*-label / --*-value".to_string())
            }
            strmarket_recon::MarketError::MissingInputs => {
                Some("add [inputs.revenue] and [inputs.rent] sections with a `file` each".to_string())
            }
            _ => None,
        };
        Self { code: market_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
