use crate::adapters::process::run_captured;
use crate::domain::model::{ExtractionOutput, Invocation};
use crate::domain::ports::ExtractionProvider;
use crate::utils::error::ProcessError;
use async_trait::async_trait;
use std::path::Path;

/// Extractor run as a child process: `<invocation> <input_dir> <output_dir>`.
#[derive(Debug, Clone)]
pub struct ProcessExtractor {
    invocation: Invocation,
}

impl ProcessExtractor {
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }
}

#[async_trait]
impl ExtractionProvider for ProcessExtractor {
    async fn extract(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<ExtractionOutput, ProcessError> {
        tracing::info!("Running extractor {}", self.invocation.display_name());
        let stdout = run_captured(&self.invocation, &[input_dir, output_dir], None).await?;
        Ok(ExtractionOutput(stdout))
    }
}
