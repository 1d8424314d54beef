use serde::{Deserialize, Serialize};

use crate::error::MarketError;

pub const DEFAULT_MIN_MULTIPLE: f64 = 2.0;
pub const DEFAULT_MATCH_THRESHOLD: f64 = strmarket_match::DEFAULT_MATCH_THRESHOLD;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_min_multiple")]
    pub min_multiple: f64,
    /// Fixed RNG seed for reproducible jitter. `None` uses system randomness.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub join: JoinConfig,
    #[serde(default)]
    pub inputs: Option<InputsConfig>,
    #[serde(default)]
    pub seasonal: SeasonalConfig,
}

fn default_name() -> String {
    "market".into()
}

fn default_min_multiple() -> f64 {
    DEFAULT_MIN_MULTIPLE
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            min_multiple: DEFAULT_MIN_MULTIPLE,
            seed: None,
            join: JoinConfig::default(),
            inputs: None,
            seasonal: SeasonalConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct JoinConfig {
    #[serde(default)]
    pub strategy: JoinStrategy,
    /// Minimum similarity for a fuzzy join. Ignored by `exact_key`.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_MATCH_THRESHOLD
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            strategy: JoinStrategy::default(),
            threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStrategy {
    /// Lowercased, trimmed label must be identical on both sides.
    #[default]
    ExactKey,
    /// Exact key first, then best fuzzy label match above the threshold.
    Fuzzy,
}

impl std::fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactKey => write!(f, "exact_key"),
            Self::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct InputsConfig {
    pub revenue: SourceConfig,
    pub rent: SourceConfig,
}

/// One (label, value) CSV file.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    #[serde(default = "default_label_column")]
    pub label: String,
    /// Value column; defaults to `revenue` / `rent` depending on the source.
    #[serde(default)]
    pub value: Option<String>,
}

fn default_label_column() -> String {
    "submarket".into()
}

impl SourceConfig {
    pub fn value_column<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.value.as_deref().unwrap_or(fallback)
    }
}

// ---------------------------------------------------------------------------
// Seasonal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonalConfig {
    /// Export year. Defaults to the current local year.
    #[serde(default)]
    pub year: Option<i32>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MarketConfig {
    pub fn from_toml(input: &str) -> Result<Self, MarketError> {
        let config: MarketConfig =
            toml::from_str(input).map_err(|e| MarketError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MarketError> {
        if !self.min_multiple.is_finite() || self.min_multiple < 0.0 {
            return Err(MarketError::ConfigValidation(format!(
                "min_multiple must be a non-negative number, got {}",
                self.min_multiple
            )));
        }

        if !(0.0..=1.0).contains(&self.join.threshold) {
            return Err(MarketError::ConfigValidation(format!(
                "join.threshold must be between 0 and 1, got {}",
                self.join.threshold
            )));
        }

        if let Some(ref inputs) = self.inputs {
            for (source, cfg) in [("revenue", &inputs.revenue), ("rent", &inputs.rent)] {
                if cfg.file.trim().is_empty() {
                    return Err(MarketError::ConfigValidation(format!(
                        "inputs.{source}.file must not be empty"
                    )));
                }
                if cfg.label.trim().is_empty() || cfg.value_column(source).trim().is_empty() {
                    return Err(MarketError::ConfigValidation(format!(
                        "inputs.{source}: column names must not be empty"
                    )));
                }
            }
        }

        Ok(())
    }

    /// Inputs section, required by file-driven runs.
    pub fn inputs(&self) -> Result<&InputsConfig, MarketError> {
        self.inputs.as_ref().ok_or(MarketError::MissingInputs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
