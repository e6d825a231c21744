pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod stages;

pub use error::{CleanerError, Result};
pub use heuristics::{classify_line, LineKind};
pub use io::{load_html, DocxDocument, FetchConfig, HtmlSource};
pub use models::{
    NormalizedTranscript, SpeakerDirectory, TranscriptLine, TranscriptStats, WordToken,
};
pub use stages::{
    build_document, execute_stage2, locate_payload, normalize, render_docx, Stage2Config,
};

/// Run the core pipeline on a raw HTML page: locate the payload, then normalize it.
///
/// No partial transcript is produced on failure.
pub fn clean_html(html: &str) -> Result<NormalizedTranscript> {
    let document = locate_payload(html)?;
    normalize(&document)
}
