use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// File written by the converter inside the output directory.
pub const CONVERTED_FILE_NAME: &str = "converted.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl RunConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn converted_path(&self) -> PathBuf {
        self.output_dir.join(CONVERTED_FILE_NAME)
    }
}

/// Lower-cased extension of the detected input file, without the dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileTypeTag(String);

impl FileTypeTag {
    pub fn new(tag: impl AsRef<str>) -> Self {
        Self(tag.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<dir>/ms_conversions_<tag>.csv`
    pub fn mapping_table(&self, conversions_dir: &Path) -> PathBuf {
        conversions_dir.join(format!("ms_conversions_{}.csv", self.0))
    }
}

impl fmt::Display for FileTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutput(pub Vec<u8>);

impl ExtractionOutput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub bytes: Vec<u8>,
    pub output_file: PathBuf,
}

/// A program plus the arguments that precede the per-run arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn display_name(&self) -> String {
        self.program.display().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    DetectingType,
    PreparingOutput,
    Extracting,
    Converting,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validating => "validating",
            Stage::DetectingType => "detecting file type",
            Stage::PreparingOutput => "preparing output",
            Stage::Extracting => "extracting",
            Stage::Converting => "converting",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}
