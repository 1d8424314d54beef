//! CLI Exit Code Registry
//!
//! Single source of truth for `strm` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad argument value)                     |
//! | 3    | Invalid config (TOML parse or validation failure)    |
//! | 4    | Input error (cannot read or parse an input CSV)      |
//! | 5    | Empty result (no match / no market above threshold)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad argument values that clap cannot catch.
pub const EXIT_USAGE: u8 = 2;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Input CSV missing, unreadable, or lacking a required column.
pub const EXIT_INPUT: u8 = 4;

/// `match` found no candidate above the threshold, or `run`/`reconcile`
/// with `--fail-on-empty` produced no markets.
pub const EXIT_EMPTY_RESULT: u8 = 5;

use strmarket_recon::MarketError;

/// Map an engine error to its exit code.
pub fn market_exit_code(err: &MarketError) -> u8 {
    match err {
        MarketError::ConfigParse(_) | MarketError::ConfigValidation(_) | MarketError::MissingInputs => {
            EXIT_INVALID_CONFIG
        }
        MarketError::MissingColumn { .. } | MarketError::Csv(_) | MarketError::Io(_) => EXIT_INPUT,
    }
}
