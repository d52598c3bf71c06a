use crate::domain::model::Stage;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("cannot list directory: {0}")]
    ReadDir(#[from] std::io::Error),

    #[error("no regular file found in directory")]
    NoRegularFile,

    #[error("file '{file}' has no extension")]
    MissingExtension { file: String },
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("could not launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Exited { program: String, status: ExitStatus },

    #[error("could not write payload to '{program}': {source}")]
    Stdin {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("mapping table not found: {}", path.display())]
    MappingTableMissing { path: PathBuf },

    #[error("cannot access mapping table {}: {source}", path.display())]
    MappingTableUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot locate extractor: {message}")]
    Unresolved { message: String },
}

#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Usage error: {message}")]
    Usage { message: String },

    #[error("Failed to detect file type in {}: {source}", dir.display())]
    FileTypeDetection {
        dir: PathBuf,
        #[source]
        source: DetectionError,
    },

    #[error("Failed to create output dir {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Extractor failed due to: {0}")]
    Extraction(#[source] ProcessError),

    #[error("Converter failed due to: {0}")]
    Conversion(#[source] ProcessError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to print results: {source}")]
    Report {
        #[source]
        source: std::io::Error,
    },
}

impl CoordinatorError {
    /// The stage the run was in when it failed.
    pub fn phase(&self) -> Stage {
        match self {
            CoordinatorError::Usage { .. } | CoordinatorError::Config { .. } => Stage::Validating,
            CoordinatorError::FileTypeDetection { .. } => Stage::DetectingType,
            CoordinatorError::OutputDir { .. } => Stage::PreparingOutput,
            CoordinatorError::Extraction(_) => Stage::Extracting,
            CoordinatorError::Conversion(_) => Stage::Converting,
            CoordinatorError::Report { .. } => Stage::Done,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CoordinatorError::Usage { .. } => "Pass both -i <input_directory> and -o <output_directory>",
            CoordinatorError::Config { .. } => "Check the TOML config file and MS_READER_* environment variables",
            CoordinatorError::FileTypeDetection { source, .. } => match source {
                DetectionError::ReadDir(_) => "Check that the input directory exists and is readable",
                DetectionError::NoRegularFile => "Place the file to convert directly in the input directory",
                DetectionError::MissingExtension { .. } => {
                    "Rename the input file so its extension names the file type"
                }
            },
            CoordinatorError::OutputDir { .. } => {
                "Check permissions on the output path and that no file occupies it"
            }
            CoordinatorError::Extraction(_) => "See the extractor's stderr output above",
            CoordinatorError::Conversion(ProcessError::MappingTableMissing { .. }) => {
                "No mapping table exists for this file type; check --conversions-dir"
            }
            CoordinatorError::Conversion(ProcessError::MappingTableUnreadable { .. }) => {
                "Check read permissions on the conversions directory"
            }
            CoordinatorError::Conversion(_) => "See the converter's stderr output above",
            CoordinatorError::Report { .. } => {
                "Standard output was closed; the result is still in converted.json"
            }
        }
    }

    /// Every failure is fatal and shares one exit status.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;
