pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{ProcessConverter, ProcessExtractor};
pub use config::{CliConfig, DeploymentMode, ResourceRoot, Settings};
pub use crate::core::{coordinator::Coordinator, detect::detect_file_type};
pub use utils::error::{CoordinatorError, Result};
