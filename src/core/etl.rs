use crate::domain::model::LoadReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<LoadReport> {
        tracing::debug!("Extracting data...");
        let raw = self.pipeline.extract().await?;

        tracing::debug!("Transforming data...");
        let output = self.pipeline.transform(raw).await?;

        tracing::debug!("Loading data...");
        let report = self.pipeline.load(output).await?;
        tracing::debug!("Output saved to: {} ({} rows)", report.output_path, report.rows);

        Ok(report)
    }
}
