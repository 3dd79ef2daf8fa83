//! # Labnote Common Library
//!
//! Shared code for the labnote server and summarizer including:
//! - Record models (projects, updates, wet/dry lab digests)
//! - Flat-file JSON storage
//! - Configuration loading and data root resolution
//! - Common error type

pub mod config;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{Error, Result};
pub use models::{LabDigest, LabType, LatestSummary, ProjectDescription, UpdateEntry, UserProfile};
pub use storage::FileStore;
