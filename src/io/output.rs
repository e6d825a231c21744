use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name used for the text export when only a directory is given
pub const DEFAULT_TEXT_FILE: &str = "transcript.txt";
/// File name used for the document export when only a directory is given
pub const DEFAULT_DOCX_FILE: &str = "transcript.docx";

/// Write the transcript text verbatim
pub fn write_text_file(text: &str, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, text).with_context(|| format!("Failed to write file: {:?}", path))
}

/// Write an assembled `.docx` buffer
pub fn write_docx_file(bytes: &[u8], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write file: {:?}", path))
}

/// Default export paths inside `dir`
pub fn default_output_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(DEFAULT_TEXT_FILE), dir.join(DEFAULT_DOCX_FILE))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    Ok(())
}
