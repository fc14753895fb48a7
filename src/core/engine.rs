use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExpansionEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExpansionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Collect, expand and write every query. Returns the written file paths.
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("Starting expansion run");

        tracing::info!("Collecting queries...");
        let queries = self.pipeline.collect().await?;
        tracing::info!("Collected {} queries", queries.len());

        tracing::info!("Expanding shorthand symbols...");
        let result = self.pipeline.expand(queries).await?;
        tracing::info!(
            "Expanded {} queries ({} changed)",
            result.queries.len(),
            result.changed_count()
        );

        tracing::info!("Writing output...");
        let written = self.pipeline.emit(result).await?;
        for path in &written {
            tracing::info!("Output saved to: {}", path);
        }

        Ok(written)
    }
}
