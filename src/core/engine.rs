use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct CoachEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> CoachEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("📥 Loading quota spreadsheet...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", records.len());

        tracing::info!("🧮 Calculating pacing metrics...");
        let result = self.pipeline.transform(records).await?;
        tracing::info!("Report ready: {}", result.report.subject);

        tracing::info!("💾 Writing coaching report...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
