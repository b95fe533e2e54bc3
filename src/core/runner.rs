use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct RoiRunner<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RoiRunner<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract, transform, load. Returns where the report was written.
    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting ROI report...");

        let scenarios = self.pipeline.extract()?;
        tracing::info!("Extracted {} scenarios", scenarios.len());

        let bundle = self.pipeline.transform(scenarios)?;
        let favorable = bundle
            .results
            .iter()
            .filter(|r| r.metrics.roi_assessment().is_favorable())
            .count();
        tracing::info!(
            "Evaluated {} scenarios ({} with non-negative ROI)",
            bundle.results.len(),
            favorable
        );

        let output_path = self.pipeline.load(bundle)?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(output_path)
    }
}
