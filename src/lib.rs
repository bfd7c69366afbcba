pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::CoachConfig, RunConfig};
pub use core::{
    engine::CoachEngine,
    pacing::{compute_all, parse_period},
    pipeline::CoachPipeline,
    report::ReportBuilder,
};
pub use domain::model::{PacingResult, Period, PeriodParse, QuotaRecord};
pub use utils::error::{CoachError, Result};
