//! Flat-file JSON storage
//!
//! Every record is one JSON file per user, read and rewritten wholesale:
//!
//! ```text
//! <root>/project_descriptions/{user_id}_projects.json
//! <root>/updates/{user_id}_updates.json
//! <root>/updates/{user_id}_wet_updates.json
//! <root>/updates/{user_id}_dry_updates.json
//! ```
//!
//! A missing file reads as "no record". A file whose top-level JSON has the
//! wrong kind (e.g. an array where an object is expected) also reads as
//! "no record". Malformed JSON is an error and is never overwritten.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::models::{LabDigest, LabType, ProjectDescription, UpdateEntry};
use crate::{Error, Result};

const PROJECTS_DIR: &str = "project_descriptions";
const UPDATES_DIR: &str = "updates";

/// Check that a user id is safe to embed in a file name
///
/// Accepts ASCII alphanumerics, `-` and `_` only.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    if user_id.is_empty() || user_id.len() > 128 {
        return Err(Error::InvalidInput(
            "user_id must be between 1 and 128 characters".to_string(),
        ));
    }
    if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidInput(format!(
            "user_id '{}' may only contain letters, digits, '-' and '_'",
            user_id
        )));
    }
    Ok(())
}

/// JSON file store rooted at a data directory
pub struct FileStore {
    root: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn project_path(&self, user_id: &str) -> PathBuf {
        self.root
            .join(PROJECTS_DIR)
            .join(format!("{}_projects.json", user_id))
    }

    pub fn updates_path(&self, user_id: &str) -> PathBuf {
        self.root
            .join(UPDATES_DIR)
            .join(format!("{}_updates.json", user_id))
    }

    pub fn digest_path(&self, user_id: &str, lab: LabType) -> PathBuf {
        self.root
            .join(UPDATES_DIR)
            .join(format!("{}_{}_updates.json", user_id, lab.as_str()))
    }

    /// Load a user's project description, `None` if never written
    pub async fn load_project(&self, user_id: &str) -> Result<Option<ProjectDescription>> {
        validate_user_id(user_id)?;
        read_object(&self.project_path(user_id)).await
    }

    /// Overwrite a user's project description
    pub async fn save_project(&self, user_id: &str, project: &ProjectDescription) -> Result<()> {
        validate_user_id(user_id)?;
        let _guard = self.write_lock.lock().await;
        write_json(&self.project_path(user_id), project).await
    }

    /// Load the full update log, oldest first
    pub async fn load_updates(&self, user_id: &str) -> Result<Vec<UpdateEntry>> {
        validate_user_id(user_id)?;
        read_updates(&self.updates_path(user_id)).await
    }

    /// Append one entry to the update log and return the new log length
    pub async fn append_update(&self, user_id: &str, entry: UpdateEntry) -> Result<usize> {
        validate_user_id(user_id)?;
        let path = self.updates_path(user_id);

        let _guard = self.write_lock.lock().await;
        let mut updates = read_updates(&path).await?;
        updates.push(entry);
        write_json(&path, &updates).await?;

        debug!(user_id = %user_id, count = updates.len(), "Appended update");
        Ok(updates.len())
    }

    /// Load the wet or dry digest produced by the summarizer
    pub async fn load_digest(&self, user_id: &str, lab: LabType) -> Result<Option<LabDigest>> {
        validate_user_id(user_id)?;
        read_object(&self.digest_path(user_id, lab)).await
    }

    /// Overwrite the wet or dry digest for a user
    pub async fn save_digest(&self, user_id: &str, lab: LabType, digest: &LabDigest) -> Result<()> {
        validate_user_id(user_id)?;
        let _guard = self.write_lock.lock().await;
        write_json(&self.digest_path(user_id, lab), digest).await
    }
}

/// Read and parse a JSON file, `None` if it does not exist
pub async fn read_json_value(path: &Path) -> Result<Option<Value>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn read_object<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match read_json_value(path).await? {
        Some(value) if value.is_object() => Ok(Some(serde_json::from_value(value)?)),
        _ => Ok(None),
    }
}

async fn read_updates(path: &Path) -> Result<Vec<UpdateEntry>> {
    match read_json_value(path).await? {
        Some(value) if value.is_array() => Ok(serde_json::from_value(value)?),
        _ => Ok(Vec::new()),
    }
}

/// Write `data` as pretty-printed JSON, replacing `path` atomically
///
/// The bytes land in a sibling temp file first and are renamed over the
/// target, so readers see either the old or the new contents.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Internal(format!("No parent directory for {}", path.display())))?;
    fs::create_dir_all(parent).await?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "record".to_string());
    let tmp_path = parent.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));

    let bytes = serde_json::to_vec_pretty(data)?;
    let written = match fs::write(&tmp_path, &bytes).await {
        Ok(()) => fs::rename(&tmp_path, path).await,
        Err(e) => Err(e),
    };
    if let Err(e) = written {
        // A failed write may still have created a partial temp file
        let _ = fs::remove_file(&tmp_path).await;
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn entry(date: &str, text: &str) -> UpdateEntry {
        UpdateEntry {
            date: date.to_string(),
            description: text.to_string(),
            project_id: None,
        }
    }

    #[test]
    fn test_validate_user_id() {
        assert!(validate_user_id("123").is_ok());
        assert!(validate_user_id("alice_lab-2").is_ok());
        assert!(validate_user_id("").is_err());
        assert!(validate_user_id("../etc").is_err());
        assert!(validate_user_id("a/b").is_err());
        assert!(validate_user_id("a b").is_err());
    }

    #[test]
    fn test_file_layout() {
        let store = FileStore::new("/data");
        assert_eq!(
            store.project_path("123"),
            PathBuf::from("/data/project_descriptions/123_projects.json")
        );
        assert_eq!(
            store.updates_path("123"),
            PathBuf::from("/data/updates/123_updates.json")
        );
        assert_eq!(
            store.digest_path("123", LabType::Wet),
            PathBuf::from("/data/updates/123_wet_updates.json")
        );
    }

    #[tokio::test]
    async fn test_missing_files_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert!(store.load_project("123").await.unwrap().is_none());
        assert!(store.load_updates("123").await.unwrap().is_empty());
        assert!(store.load_digest("123", LabType::Dry).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_project_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let first = ProjectDescription {
            name: "First".to_string(),
            description: "Old".to_string(),
        };
        let second = ProjectDescription {
            name: "Second".to_string(),
            description: "New".to_string(),
        };
        store.save_project("123", &first).await.unwrap();
        store.save_project("123", &second).await.unwrap();

        assert_eq!(store.load_project("123").await.unwrap(), Some(second));

        let raw = std::fs::read_to_string(store.project_path("123")).unwrap();
        assert!(raw.contains("\n  \"Name\""), "expected 2-space indent: {}", raw);
    }

    #[tokio::test]
    async fn test_append_keeps_order() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.append_update("123", entry("2026-01-10", "a")).await.unwrap(), 1);
        assert_eq!(store.append_update("123", entry("2026-01-09", "b")).await.unwrap(), 2);

        let updates = store.load_updates("123").await.unwrap();
        assert_eq!(updates[0].description, "a");
        assert_eq!(updates[1].description, "b");
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(dir.path()));

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .append_update("123", entry("2026-01-10", &format!("update {}", i)))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.load_updates("123").await.unwrap().len(), 16);
    }

    #[tokio::test]
    async fn test_wrong_kind_reads_as_missing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        std::fs::create_dir_all(dir.path().join("updates")).unwrap();
        std::fs::write(store.updates_path("123"), r#"{"not": "a list"}"#).unwrap();
        std::fs::write(store.digest_path("123", LabType::Wet), "[1, 2, 3]").unwrap();

        assert!(store.load_updates("123").await.unwrap().is_empty());
        assert!(store.load_digest("123", LabType::Wet).await.unwrap().is_none());

        // Appending over a wrong-kind file starts a fresh list
        store.append_update("123", entry("2026-01-10", "x")).await.unwrap();
        assert_eq!(store.load_updates("123").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_an_error_and_preserved() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        std::fs::create_dir_all(dir.path().join("updates")).unwrap();
        std::fs::write(store.updates_path("123"), "[{\"date\": ").unwrap();

        let result = store.append_update("123", entry("2026-01-10", "x")).await;
        assert!(matches!(result, Err(Error::Json(_))));

        let raw = std::fs::read_to_string(store.updates_path("123")).unwrap();
        assert_eq!(raw, "[{\"date\": ");
    }

    #[tokio::test]
    async fn test_digest_round_trip_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let digest = LabDigest::empty(LabType::Wet);
        store.save_digest("123", LabType::Wet, &digest).await.unwrap();
        assert_eq!(store.load_digest("123", LabType::Wet).await.unwrap(), Some(digest));

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("updates"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("occupied.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "x").unwrap();

        let result = write_json(&target, &serde_json::json!({"a": 1})).await;
        assert!(matches!(result, Err(Error::Io(_))));

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
        assert!(target.join("keep.txt").exists());
    }

    #[tokio::test]
    async fn test_rejects_unsafe_user_id() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let result = store.load_project("../../secrets").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
