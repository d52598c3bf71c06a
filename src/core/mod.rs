pub mod coordinator;
pub mod detect;
pub mod output;

pub use crate::domain::model::{ConversionResult, ExtractionOutput, FileTypeTag, RunConfig, Stage};
pub use crate::domain::ports::{Converter, ExtractionProvider};
pub use crate::utils::error::Result;
