//! labnote-summarize library
//!
//! Turns a list of lab updates into two lay-audience digests: one written
//! for wet-lab (bench) readers and one for dry-lab (computational) readers.
//! Each update is sent to a generative-text model twice, once per audience,
//! and the most recent summary that is not the "nothing reported" sentinel
//! becomes that audience's digest.

pub mod digest;
pub mod error;
pub mod gemini;
pub mod generator;
pub mod input;
pub mod prompts;
pub mod retry;
pub mod runner;

pub use error::{Result, SummarizeError};
pub use generator::{GenerationRequest, TextGenerator};
pub use runner::{summarize_updates, write_digests, DigestPair, SummarizeOptions};
