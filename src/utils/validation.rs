use crate::domain::model::RunConfig;
use crate::utils::error::{CoordinatorError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let raw = path.as_os_str();
    if raw.is_empty() {
        return Err(CoordinatorError::Usage {
            message: format!("{} cannot be empty", field_name),
        });
    }

    if raw.as_encoded_bytes().contains(&0) {
        return Err(CoordinatorError::Usage {
            message: format!("{} contains null bytes", field_name),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoordinatorError::Config {
            message: format!("{} cannot be empty or whitespace-only", field_name),
        });
    }
    Ok(())
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_directory", &self.input_dir)?;
        validate_path("output_directory", &self.output_dir)?;
        Ok(())
    }
}
