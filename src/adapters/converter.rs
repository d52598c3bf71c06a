use crate::adapters::process::run_captured;
use crate::domain::model::{ExtractionOutput, Invocation};
use crate::domain::ports::Converter;
use crate::utils::error::ProcessError;
use async_trait::async_trait;
use std::path::Path;

/// Converter run as a child process:
/// `<invocation> <mapping_table> <output_file>`, payload on stdin, result on
/// stdout. The child is responsible for writing `output_file`. A child that
/// exits 0 without reading all of stdin still counts as a success.
#[derive(Debug, Clone)]
pub struct ProcessConverter {
    invocation: Invocation,
}

impl ProcessConverter {
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }
}

#[async_trait]
impl Converter for ProcessConverter {
    async fn convert(
        &self,
        raw: ExtractionOutput,
        mapping_table: &Path,
        output_file: &Path,
    ) -> Result<Vec<u8>, ProcessError> {
        match tokio::fs::try_exists(mapping_table).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(ProcessError::MappingTableMissing {
                    path: mapping_table.to_path_buf(),
                })
            }
            Err(source) => {
                return Err(ProcessError::MappingTableUnreadable {
                    path: mapping_table.to_path_buf(),
                    source,
                })
            }
        }

        tracing::info!("Running converter {}", self.invocation.display_name());
        run_captured(
            &self.invocation,
            &[mapping_table, output_file],
            Some(raw.as_bytes()),
        )
        .await
    }
}
