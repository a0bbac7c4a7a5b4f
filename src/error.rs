//! Pipeline error taxonomy.
//!
//! Only structurally invalid input is a hard failure. Missing values,
//! insufficient samples, and degenerate columns are not errors anywhere in
//! the core: they degrade to omission or explicit `Option::None`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A record with no usable identifier cannot be keyed into any table.
    #[error("record is missing an identifier: {context}")]
    MissingIdentifier { context: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}
