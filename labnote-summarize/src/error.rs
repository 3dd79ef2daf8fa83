//! Error types for labnote-summarize

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SummarizeError>;

#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Update input is missing, malformed, or has invalid fields
    #[error("{0}")]
    Input(String),

    /// Transport-level failure talking to the model API
    #[error("Network error: {0}")]
    Network(String),

    /// Model API answered with a non-success status
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Model API response could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model returned no text
    #[error("Empty response from Gemini.")]
    EmptyResponse,

    /// Every attempt failed
    #[error("Gemini call failed after {retries} retries: {last}")]
    RetriesExhausted { retries: u32, last: Box<SummarizeError> },

    #[error(transparent)]
    Common(#[from] labnote_common::Error),
}
