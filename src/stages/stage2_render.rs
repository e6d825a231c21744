use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::error::Result as CleanerResult;
use crate::heuristics::{classify_line, LineKind};
use crate::io::{write_docx_file, write_text_file, DocxDocument};

/// Configuration for Stage 2 rendering
#[derive(Debug, Clone)]
pub struct Stage2Config {
    /// Whether to write the plain-text transcript
    pub generate_text: bool,
    /// Whether to write the `.docx` transcript
    pub generate_docx: bool,
    /// Title stored in the document properties
    pub document_title: String,
}

impl Default for Stage2Config {
    fn default() -> Self {
        Self {
            generate_text: true,
            generate_docx: true,
            document_title: "Transcript".to_string(),
        }
    }
}

/// Result of Stage 2 rendering
#[derive(Debug)]
pub struct Stage2Result {
    /// Path to the text transcript (if written)
    pub text_path: Option<PathBuf>,
    /// Path to the document (if written)
    pub docx_path: Option<PathBuf>,
}

/// Build the document model from newline-joined transcript text
///
/// Blank lines become empty paragraphs, lines that look like speaker names
/// become bold paragraphs, everything else becomes a trimmed plain paragraph.
pub fn build_document(text: &str, title: &str) -> DocxDocument {
    let mut doc = DocxDocument::new(title);

    for line in text.split('\n') {
        match classify_line(line) {
            LineKind::Blank => doc.add_empty_paragraph(),
            LineKind::Header => doc.add_bold_paragraph(line.trim()),
            LineKind::Body => doc.add_paragraph(line.trim()),
        }
    }

    doc
}

/// Render transcript text to an in-memory `.docx` buffer
pub fn render_docx(text: &str, config: &Stage2Config) -> CleanerResult<Vec<u8>> {
    let doc = build_document(text, &config.document_title);
    let bytes = doc.to_bytes()?;
    info!(
        "Rendered document with {} paragraphs ({} bytes)",
        doc.paragraphs().len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Execute Stage 2: Rendering
///
/// Writes the plain-text transcript and/or the `.docx` export.
pub fn execute_stage2(
    text: &str,
    text_output: Option<&Path>,
    docx_output: Option<&Path>,
    config: &Stage2Config,
) -> Result<Stage2Result> {
    let mut result = Stage2Result {
        text_path: None,
        docx_path: None,
    };

    if config.generate_text {
        if let Some(path) = text_output {
            info!("Writing text transcript to {:?}", path);
            write_text_file(text, path)?;
            result.text_path = Some(path.to_path_buf());
        }
    }

    if config.generate_docx {
        if let Some(path) = docx_output {
            info!("Writing document transcript to {:?}", path);
            let bytes = render_docx(text, config)?;
            write_docx_file(&bytes, path)?;
            result.docx_path = Some(path.to_path_buf());
        }
    }

    Ok(result)
}
