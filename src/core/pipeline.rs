use crate::core::engine::evaluate;
use crate::core::report::{to_csv, to_json, to_tsv};
use crate::core::{ConfigProvider, Pipeline, ReportBundle, Scenario, Storage};
use crate::utils::error::{Result, RoiError};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

/// Evaluates configured scenarios and writes the exports through `Storage`.
pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn rendered<'a>(&self, bundle: &'a ReportBundle, format: &str) -> Result<&'a str> {
        match format {
            "csv" => Ok(&bundle.csv_output),
            "tsv" => Ok(&bundle.tsv_output),
            "json" => Ok(&bundle.json_output),
            other => Err(RoiError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    fn extract(&self) -> Result<Vec<Scenario>> {
        let scenarios = self.config.scenarios();
        if scenarios.is_empty() {
            return Err(RoiError::MissingConfigError {
                field: "scenario".to_string(),
            });
        }
        tracing::debug!("Loaded {} scenarios from configuration", scenarios.len());
        Ok(scenarios)
    }

    fn transform(&self, scenarios: Vec<Scenario>) -> Result<ReportBundle> {
        let mut results = Vec::with_capacity(scenarios.len());

        for scenario in &scenarios {
            let result = evaluate(scenario)?;
            tracing::debug!(
                "Scenario '{}': {} customers, CAC {}, ROI {}%",
                result.scenario,
                result.metrics.new_customers,
                result.metrics.cac,
                result.metrics.roi_percent
            );
            results.push(result);
        }

        Ok(ReportBundle {
            csv_output: to_csv(&results)?,
            tsv_output: to_tsv(&results)?,
            json_output: to_json(self.config.report_name(), &results, chrono::Utc::now())?,
            results,
        })
    }

    fn load(&self, bundle: ReportBundle) -> Result<String> {
        let formats = self.config.output_formats();

        if let Some(archive_name) = self.config.bundle_filename() {
            tracing::debug!("Creating ZIP file with {} files", formats.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for format in formats {
                    let content = self.rendered(&bundle, format)?;
                    zip.start_file::<_, ()>(self.config.filename_for(format), FileOptions::default())?;
                    zip.write_all(content.as_bytes())?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(archive_name, &zip_data)?;
            return Ok(format!("{}/{}", self.config.output_path(), archive_name));
        }

        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            let filename = self.config.filename_for(format);
            let content = self.rendered(&bundle, format)?;
            self.storage.write_file(&filename, content.as_bytes())?;
            written.push(format!("{}/{}", self.config.output_path(), filename));
        }
        Ok(written.join(", "))
    }
}
