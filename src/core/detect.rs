use crate::domain::model::FileTypeTag;
use crate::utils::error::DetectionError;
use std::fs;
use std::path::Path;

/// Tags the run with the extension of the first non-directory entry of `dir`.
///
/// Entries are visited in file-name order so the result does not depend on
/// the platform's `read_dir` order. The extension is whatever follows the
/// last `.` of the name, so `.hidden` yields `hidden` and `a.tar.gz` yields
/// `gz`. A name without a usable extension is rejected rather than producing
/// an empty tag.
pub fn detect_file_type(dir: &Path) -> Result<FileTypeTag, DetectionError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        if entry.file_type()?.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        tracing::debug!("First regular file in {}: {}", dir.display(), name);

        return match extension_of(&name) {
            Some(ext) => Ok(FileTypeTag::new(ext)),
            None => Err(DetectionError::MissingExtension { file: name }),
        };
    }

    Err(DetectionError::NoRegularFile)
}

fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.')
        .map(|idx| &name[idx + 1..])
        .filter(|ext| !ext.is_empty())
}
