pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::engine::{compare_tiers, compute, evaluate, Calculator};
pub use core::pipeline::ReportPipeline;
pub use core::runner::RoiRunner;
pub use domain::catalog::{OFFER_STRENGTHS, PROSPECT_TIERS};
pub use domain::model::{
    Assessment, CacRatio, CalculatorInputs, DerivedMetrics, OfferStrength, ProspectTier,
};
pub use utils::error::{Result, RoiError};
