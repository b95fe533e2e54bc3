use crate::domain::model::{ReportBundle, Scenario};
use crate::utils::error::Result;

pub trait Storage {
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn report_name(&self) -> &str;
    fn scenarios(&self) -> Vec<Scenario>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    /// Zip archive name when exports are bundled, `None` for loose files.
    fn bundle_filename(&self) -> Option<&str>;
    fn filename_for(&self, format: &str) -> String {
        format!("roi_report.{}", format)
    }
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<Scenario>>;
    fn transform(&self, scenarios: Vec<Scenario>) -> Result<ReportBundle>;
    fn load(&self, bundle: ReportBundle) -> Result<String>;
}
