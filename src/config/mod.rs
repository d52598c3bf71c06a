pub mod toml_config;

use crate::domain::model::{Invocation, RunConfig};
use crate::utils::error::{CoordinatorError, ProcessError, Result};
use crate::utils::validation::Validate;
use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const CONTAINER_INPUT_DIR: &str = "/app/input";
pub const CONTAINER_OUTPUT_DIR: &str = "/app/output";
pub const DEFAULT_CONVERTER: &str = "ms-converter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DeploymentMode {
    /// Directories from -i/-o, extractor bundled next to the executable
    #[default]
    Cli,
    /// Fixed container mounts, extractor run as a python module
    Container,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "ms-reader")]
#[command(about = "Extracts instrument metadata from a directory and converts it to normalized JSON")]
pub struct CliConfig {
    /// Input directory containing the file to process (required)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "INPUT_DIRECTORY",
        value_parser = clap::builder::OsStringValueParser::new()
    )]
    pub input: Option<OsString>,

    /// Output directory for results (required)
    #[arg(
        short = 'o',
        long = "output",
        value_name = "OUTPUT_DIRECTORY",
        value_parser = clap::builder::OsStringValueParser::new()
    )]
    pub output: Option<OsString>,

    /// Deployment mode
    #[arg(long, value_enum, env = "MS_READER_MODE", default_value_t = DeploymentMode::Cli)]
    pub mode: DeploymentMode,

    /// Extractor executable, overriding the deployment default
    #[arg(long, env = "MS_READER_EXTRACTOR")]
    pub extractor: Option<PathBuf>,

    /// Converter executable, overriding the deployment default
    #[arg(long, env = "MS_READER_CONVERTER")]
    pub converter: Option<PathBuf>,

    /// Directory holding the ms_conversions_<type>.csv mapping tables
    #[arg(long, env = "MS_READER_CONVERSIONS_DIR")]
    pub conversions_dir: Option<PathBuf>,

    /// TOML file with [extractor] and [converter] sections
    #[arg(long, env = "MS_READER_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Location of the running executable, looked up once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRoot {
    exe_dir: PathBuf,
}

impl ResourceRoot {
    pub fn new(exe_dir: impl Into<PathBuf>) -> Self {
        Self {
            exe_dir: exe_dir.into(),
        }
    }

    pub fn discover() -> std::io::Result<Self> {
        let exe = std::env::current_exe()?;
        let exe_dir = exe
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { exe_dir })
    }

    pub fn exe_dir(&self) -> &Path {
        &self.exe_dir
    }

    /// `<exe_dir>/dist/extractor_bin`
    pub fn bundled_extractor(&self) -> PathBuf {
        self.exe_dir.join("dist").join("extractor_bin")
    }
}

/// Everything one run needs, with every default already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub run: RunConfig,
    pub extractor: Invocation,
    pub converter: Invocation,
    pub conversions_dir: PathBuf,
}

impl DeploymentMode {
    fn default_run_dirs(&self) -> (Option<PathBuf>, Option<PathBuf>) {
        match self {
            DeploymentMode::Cli => (None, None),
            DeploymentMode::Container => (
                Some(PathBuf::from(CONTAINER_INPUT_DIR)),
                Some(PathBuf::from(CONTAINER_OUTPUT_DIR)),
            ),
        }
    }

    fn default_extractor(&self, root: Option<&ResourceRoot>) -> Result<Invocation> {
        match self {
            DeploymentMode::Cli => root
                .map(|root| Invocation::new(root.bundled_extractor()))
                .ok_or_else(|| {
                    CoordinatorError::Extraction(ProcessError::Unresolved {
                        message: "executable location is unknown; pass --extractor".to_string(),
                    })
                }),
            DeploymentMode::Container => {
                Ok(Invocation::new("python3").with_args(["-m", "extractor"]))
            }
        }
    }

    fn default_conversions_dir(&self) -> PathBuf {
        match self {
            DeploymentMode::Cli => Path::new("..").join("Converter").join("csv"),
            DeploymentMode::Container => PathBuf::from("/app/Converter/csv"),
        }
    }
}

impl CliConfig {
    /// Applies flags, then environment, then the optional TOML file, then the
    /// deployment-mode defaults.
    pub fn resolve(&self, root: Option<&ResourceRoot>) -> Result<Settings> {
        let (default_input, default_output) = self.mode.default_run_dirs();
        // empty values pass parsing so validation reports them as usage errors
        let input_dir = self.input.clone().map(PathBuf::from).or(default_input);
        let output_dir = self.output.clone().map(PathBuf::from).or(default_output);
        let run = match (input_dir, output_dir) {
            (Some(input), Some(output)) => RunConfig::new(input, output),
            (input, _) => {
                let missing = if input.is_none() { "-i" } else { "-o" };
                return Err(CoordinatorError::Usage {
                    message: format!("missing required flag {}", missing),
                });
            }
        };
        run.validate()?;

        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        let converter_section = file.converter.as_ref();

        let extractor = match (&self.extractor, &file.extractor) {
            (Some(program), _) => Invocation::new(program.clone()),
            (None, Some(invocation)) => invocation.clone(),
            (None, None) => self.mode.default_extractor(root)?,
        };

        let converter = match (
            &self.converter,
            converter_section.and_then(|s| s.program.as_ref()),
        ) {
            (Some(program), _) => Invocation::new(program.clone()),
            (None, Some(program)) => Invocation::new(program.clone())
                .with_args(converter_section.map(|s| s.args.clone()).unwrap_or_default()),
            (None, None) => Invocation::new(DEFAULT_CONVERTER),
        };

        let conversions_dir = self
            .conversions_dir
            .clone()
            .or_else(|| converter_section.and_then(|s| s.conversions_dir.clone()))
            .unwrap_or_else(|| self.mode.default_conversions_dir());

        Ok(Settings {
            run,
            extractor,
            converter,
            conversions_dir,
        })
    }
}
