use std::path::Path;
use tokio::fs::DirBuilder;

/// Creates `path` and any missing parents with mode 0755. An existing
/// directory is accepted as is.
pub async fn prepare_output_dir(path: &Path) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);
    builder.create(path).await
}
