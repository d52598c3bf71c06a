use crate::domain::model::ExtractionOutput;
use crate::utils::error::ProcessError;
use async_trait::async_trait;
use std::path::Path;

/// Reads raw instrument data from a directory and yields structured bytes.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    async fn extract(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> std::result::Result<ExtractionOutput, ProcessError>;
}

/// Applies a mapping table to extracted data, writes the artifact to
/// `output_file` and returns its content.
#[async_trait]
pub trait Converter: Send + Sync {
    async fn convert(
        &self,
        raw: ExtractionOutput,
        mapping_table: &Path,
        output_file: &Path,
    ) -> std::result::Result<Vec<u8>, ProcessError>;
}
