// Adapters layer: child-process implementations of the extraction and
// conversion ports.

pub mod converter;
pub mod extractor;
pub mod process;

pub use converter::ProcessConverter;
pub use extractor::ProcessExtractor;
