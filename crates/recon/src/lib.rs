//! `strmarket-recon`: Revenue-to-rent market reconciliation engine.
//!
//! Pure engine crate: receives (label, value) datasets, returns ranked
//! submarkets and their seasonal expansion. File loading and CSV export are
//! provided as helpers; no CLI dependencies.

pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod export;
pub mod matcher;
pub mod model;
pub mod random;
pub mod seasonal;

pub use config::{JoinStrategy, MarketConfig};
pub use engine::{reconcile, reconcile_with, run, ReconcileOptions};
pub use error::MarketError;
pub use model::{MarketInput, MarketReport, ReconciledMarket, RentRecord, RevenueRecord};
pub use random::{MidpointRandom, RandomSource, SeededRandom, SystemRandom};
pub use seasonal::{expand_seasonal, MonthlyRow};
