//! Record types persisted by the flat-file store
//!
//! Field names follow the JSON files on disk, which is why some of them
//! are capitalized (`Name`, `Description`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A user's project description (`{user_id}_projects.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescription {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
}

/// One entry of the append-only update log (`{user_id}_updates.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntry {
    pub date: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Lab audience a summary is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabType {
    /// Bench work: reagents, samples, protocols
    Wet,
    /// Computational work: pipelines, data, statistics
    Dry,
}

impl LabType {
    pub const ALL: [LabType; 2] = [LabType::Wet, LabType::Dry];

    pub fn as_str(&self) -> &'static str {
        match self {
            LabType::Wet => "wet",
            LabType::Dry => "dry",
        }
    }

    /// Summary text meaning "nothing relevant happened for this audience"
    pub fn sentinel(&self) -> &'static str {
        match self {
            LabType::Wet => "No wet-lab work reported this period.",
            LabType::Dry => "No dry-lab work reported this period.",
        }
    }
}

impl fmt::Display for LabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wet" => Ok(LabType::Wet),
            "dry" => Ok(LabType::Dry),
            other => Err(Error::InvalidInput(format!(
                "Unknown lab type '{}' (expected 'wet' or 'dry')",
                other
            ))),
        }
    }
}

/// Most recent relevant summary for one lab type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestSummary {
    pub date: String,
    pub summary: String,
    pub projects: Vec<String>,
}

/// Contents of a `{user_id}_{wet|dry}_updates.json` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabDigest {
    pub latest: LatestSummary,
}

impl LabDigest {
    /// Digest used when no update produced a relevant summary
    pub fn empty(lab: LabType) -> Self {
        Self {
            latest: LatestSummary {
                date: String::new(),
                summary: lab.sentinel().to_string(),
                projects: Vec::new(),
            },
        }
    }
}

/// Registry entry for a lab member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
