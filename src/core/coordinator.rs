use crate::core::detect::detect_file_type;
use crate::core::output::prepare_output_dir;
use crate::domain::model::{ConversionResult, RunConfig, Stage};
use crate::domain::ports::{Converter, ExtractionProvider};
use crate::utils::error::{CoordinatorError, Result};
use crate::utils::validation::Validate;
use std::io::Write;
use std::path::PathBuf;

pub struct Coordinator<E: ExtractionProvider, C: Converter> {
    extractor: E,
    converter: C,
    conversions_dir: PathBuf,
}

impl<E: ExtractionProvider, C: Converter> Coordinator<E, C> {
    pub fn new(extractor: E, converter: C, conversions_dir: impl Into<PathBuf>) -> Self {
        Self {
            extractor,
            converter,
            conversions_dir: conversions_dir.into(),
        }
    }

    /// Runs one conversion. Phase banners and the converted body go to `out`;
    /// the first failing stage aborts the run.
    pub async fn run<W: Write + Send>(
        &self,
        config: &RunConfig,
        out: &mut W,
    ) -> Result<ConversionResult> {
        let result = self.run_stages(config, out).await;
        match &result {
            Ok(_) => enter(Stage::Done),
            Err(e) => {
                tracing::debug!("Run {} during {}", Stage::Failed, e.phase());
            }
        }
        result
    }

    async fn run_stages<W: Write + Send>(
        &self,
        config: &RunConfig,
        out: &mut W,
    ) -> Result<ConversionResult> {
        enter(Stage::Validating);
        config.validate()?;

        enter(Stage::DetectingType);
        let tag = detect_file_type(&config.input_dir).map_err(|source| {
            CoordinatorError::FileTypeDetection {
                dir: config.input_dir.clone(),
                source,
            }
        })?;
        tracing::info!("Detected file type: {}", tag);

        enter(Stage::PreparingOutput);
        prepare_output_dir(&config.output_dir)
            .await
            .map_err(|source| CoordinatorError::OutputDir {
                path: config.output_dir.clone(),
                source,
            })?;

        enter(Stage::Extracting);
        report(out, "=== Running extractor ===")?;
        let raw = self
            .extractor
            .extract(&config.input_dir, &config.output_dir)
            .await
            .map_err(CoordinatorError::Extraction)?;
        log_payload_shape(raw.as_bytes());

        enter(Stage::Converting);
        report(out, "=== Running converter ===")?;
        let mapping_table = tag.mapping_table(&self.conversions_dir);
        let output_file = config.converted_path();
        tracing::debug!(
            "Converting with mapping table {} into {}",
            mapping_table.display(),
            output_file.display()
        );
        let bytes = self
            .converter
            .convert(raw, &mapping_table, &output_file)
            .await
            .map_err(CoordinatorError::Conversion)?;

        report(out, "\n=== MS Reader results ===")?;
        out.write_all(&bytes).map_err(report_error)?;
        writeln!(out).map_err(report_error)?;

        Ok(ConversionResult { bytes, output_file })
    }
}

fn enter(stage: Stage) {
    tracing::debug!("Stage: {}", stage);
}

fn report<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{}", line).map_err(report_error)
}

fn report_error(source: std::io::Error) -> CoordinatorError {
    CoordinatorError::Report { source }
}

fn log_payload_shape(bytes: &[u8]) {
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(serde_json::Value::Object(map)) => {
            tracing::debug!("Extractor produced a JSON object with {} keys", map.len());
        }
        Ok(_) => tracing::debug!("Extractor produced {} bytes of JSON", bytes.len()),
        Err(_) => tracing::debug!("Extractor produced {} bytes of non-JSON output", bytes.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ExtractionOutput;
    use crate::utils::error::ProcessError;
    use async_trait::async_trait;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct FakeExtractor {
        payload: Option<Vec<u8>>,
    }

    #[async_trait]
    impl ExtractionProvider for FakeExtractor {
        async fn extract(
            &self,
            _input_dir: &Path,
            _output_dir: &Path,
        ) -> std::result::Result<ExtractionOutput, ProcessError> {
            match &self.payload {
                Some(bytes) => Ok(ExtractionOutput(bytes.clone())),
                None => Err(ProcessError::Unresolved {
                    message: "extractor exploded".to_string(),
                }),
            }
        }
    }

    #[derive(Default, Clone)]
    struct RecordingConverter {
        calls: Arc<Mutex<Vec<(Vec<u8>, PathBuf, PathBuf)>>>,
    }

    #[async_trait]
    impl Converter for RecordingConverter {
        async fn convert(
            &self,
            raw: ExtractionOutput,
            mapping_table: &Path,
            output_file: &Path,
        ) -> std::result::Result<Vec<u8>, ProcessError> {
            self.calls.lock().unwrap().push((
                raw.as_bytes().to_vec(),
                mapping_table.to_path_buf(),
                output_file.to_path_buf(),
            ));
            Ok(br#"{"normalized":true}"#.to_vec())
        }
    }

    fn input_with(file: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(file), b"raw").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_hands_payload_and_mapping_table_to_converter() {
        let input = input_with("scan.mzml");
        let output = TempDir::new().unwrap();
        let converter = RecordingConverter::default();
        let coordinator = Coordinator::new(
            FakeExtractor {
                payload: Some(br#"{"a":1}"#.to_vec()),
            },
            converter.clone(),
            "/res/csv",
        );

        let config = RunConfig::new(input.path(), output.path().join("out"));
        let mut stdout = Vec::new();
        let result = coordinator.run(&config, &mut stdout).await.unwrap();

        let calls = converter.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, br#"{"a":1}"#.to_vec());
        assert_eq!(calls[0].1, PathBuf::from("/res/csv/ms_conversions_mzml.csv"));
        assert_eq!(calls[0].2, output.path().join("out").join("converted.json"));

        assert_eq!(result.bytes, br#"{"normalized":true}"#.to_vec());
        let printed = String::from_utf8(stdout).unwrap();
        assert!(printed.contains("=== Running extractor ==="));
        assert!(printed.contains("=== Running converter ==="));
        assert!(printed.ends_with("=== MS Reader results ===\n{\"normalized\":true}\n"));
        assert!(output.path().join("out").is_dir());
    }

    #[tokio::test]
    async fn test_extraction_failure_skips_converter() {
        let input = input_with("sample.emd");
        let output = TempDir::new().unwrap();
        let converter = RecordingConverter::default();
        let coordinator =
            Coordinator::new(FakeExtractor { payload: None }, converter.clone(), "/res");

        let config = RunConfig::new(input.path(), output.path());
        let err = coordinator.run(&config, &mut Vec::new()).await.unwrap_err();

        assert!(matches!(err, CoordinatorError::Extraction(_)));
        assert_eq!(err.phase(), Stage::Extracting);
        assert!(converter.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_detection_failure_leaves_output_untouched() {
        let input = TempDir::new().unwrap();
        std::fs::create_dir(input.path().join("nested")).unwrap();
        let output = TempDir::new().unwrap();
        let target = output.path().join("never");
        let coordinator = Coordinator::new(
            FakeExtractor {
                payload: Some(Vec::new()),
            },
            RecordingConverter::default(),
            "/res",
        );

        let config = RunConfig::new(input.path(), &target);
        let err = coordinator.run(&config, &mut Vec::new()).await.unwrap_err();

        assert!(matches!(err, CoordinatorError::FileTypeDetection { .. }));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_empty_paths_are_usage_errors() {
        let coordinator = Coordinator::new(
            FakeExtractor {
                payload: Some(Vec::new()),
            },
            RecordingConverter::default(),
            "/res",
        );

        let config = RunConfig::new("", "/tmp/out");
        let err = coordinator.run(&config, &mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, CoordinatorError::Usage { .. }));
    }

    #[tokio::test]
    async fn test_output_dir_conflict() {
        let input = input_with("scan.mzml");
        let output = TempDir::new().unwrap();
        let blocked = output.path().join("file");
        std::fs::write(&blocked, b"x").unwrap();
        let converter = RecordingConverter::default();
        let coordinator = Coordinator::new(
            FakeExtractor {
                payload: Some(Vec::new()),
            },
            converter.clone(),
            "/res",
        );

        let config = RunConfig::new(input.path(), &blocked);
        let err = coordinator.run(&config, &mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, CoordinatorError::OutputDir { .. }));
        assert!(converter.calls.lock().unwrap().is_empty());
    }
}
