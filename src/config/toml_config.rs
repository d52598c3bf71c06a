use crate::domain::model::Invocation;
use crate::utils::error::{CoordinatorError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Optional file overriding where the external collaborators live.
///
/// ```toml
/// [extractor]
/// program = "python3"
/// args = ["-m", "extractor"]
///
/// [converter]
/// program = "${HOME}/bin/ms-converter"
/// conversions_dir = "/opt/Converter/csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub extractor: Option<Invocation>,
    pub converter: Option<ConverterSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterSection {
    pub program: Option<PathBuf>,
    #[serde(default)]
    pub args: Vec<String>,
    pub conversions_dir: Option<PathBuf>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CoordinatorError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed_content).map_err(|e| CoordinatorError::Config {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// 替換環境變數 (例如 ${HOME})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            CoordinatorError::Config {
                message: format!("invalid substitution pattern: {}", e),
            }
        })?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let name = &caps[1];
            match std::env::var(name) {
                Ok(value) => value,
                Err(_) => {
                    missing.push(name.to_string());
                    String::new()
                }
            }
        });

        if !missing.is_empty() {
            return Err(CoordinatorError::Config {
                message: format!("undefined environment variables: {}", missing.join(", ")),
            });
        }

        Ok(result.into_owned())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(extractor) = &self.extractor {
            validate_non_empty_string("extractor.program", &extractor.program.to_string_lossy())?;
        }
        if let Some(converter) = &self.converter {
            if let Some(program) = &converter.program {
                validate_non_empty_string("converter.program", &program.to_string_lossy())?;
            }
        }
        Ok(())
    }
}
