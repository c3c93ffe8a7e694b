pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::http::PortClient;
pub use crate::config::ApiSettings;
pub use crate::core::{
    eol::{compute_eol_counts, EolCount, EolSync},
    report::{PhaseReport, SetupReport, UnitOutcome, UnitStatus},
    scorecard::ScorecardRegistrar,
    setup::{SetupEngine, SetupPlan},
};
pub use crate::utils::error::{PortError, Result};
