pub mod engine;
pub mod format;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod runner;

pub use crate::domain::model::{ReportBundle, Scenario};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
