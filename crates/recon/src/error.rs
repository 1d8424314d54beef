use std::fmt;

#[derive(Debug)]
pub enum MarketError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (threshold out of range, empty path, etc.).
    ConfigValidation(String),
    /// Config has no `[inputs]` section but the caller needs file inputs.
    MissingInputs,
    /// Missing required column in an input CSV.
    MissingColumn { source: String, column: String },
    /// CSV read/write error.
    Csv(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingInputs => write!(f, "config has no [inputs] section"),
            Self::MissingColumn { source, column } => {
                write!(f, "{source}: missing column '{column}'")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MarketError {}

impl From<csv::Error> for MarketError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e.to_string())
    }
}

impl From<std::io::Error> for MarketError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
