use thiserror::Error;

/// Errors raised while turning an HTML page into a transcript
#[derive(Debug, Error)]
pub enum CleanerError {
    #[error("No <script id='document'> JSON block found in HTML")]
    MissingPayload,

    #[error("Embedded document payload is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Could not find alignment data in the JSON (missing `{missing}` in {path})")]
    MissingAlignment { path: String, missing: String },

    #[error("Invalid payload selector: {0}")]
    Selector(String),

    #[error("Failed to assemble document: {0}")]
    Document(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CleanerError>;
