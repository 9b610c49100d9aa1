//! Document store — YAML files on disk, one `<version>.yaml` per resume.
//!
//! The transcoder itself never touches storage; it receives and returns
//! `Resume` values. This module is the collaborator that owns the
//! read-modify-write cycle at whole-document granularity.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::Resume;

/// The base version every deployment starts from; it cannot be deleted.
pub const BASE_VERSION: &str = "resume";

/// Standard template backing `create_version`, shipped with the binary.
const TEMPLATE_YAML: &str = include_str!("../../../templates/resume_template.yaml");

pub trait DocumentStore: Send + Sync {
    fn load(&self, version: &str) -> Result<Resume, AppError>;
    fn save(&self, version: &str, resume: &Resume) -> Result<(), AppError>;
    fn exists(&self, version: &str) -> bool;
    fn list_versions(&self) -> Result<Vec<String>, AppError>;
    fn create_version(&self, name: &str) -> Result<(), AppError>;
    fn delete(&self, version: &str) -> Result<(), AppError>;
}

/// Filesystem-backed store over a flat data directory.
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    /// Opens (and creates, if needed) the data directory, seeding the base
    /// version from the built-in template when it is missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let store = Self { root };
        if !store.exists(BASE_VERSION) {
            info!("Seeding base resume version from built-in template");
            fs::write(store.version_path(BASE_VERSION), TEMPLATE_YAML)?;
        }
        Ok(store)
    }

    fn version_path(&self, version: &str) -> PathBuf {
        self.root.join(format!("{version}.yaml"))
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, version: &str) -> Result<Resume, AppError> {
        let path = self.version_path(version);
        if !path.exists() {
            return Err(AppError::DocumentNotFound(version.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        decode_resume(&text, &path)
    }

    fn save(&self, version: &str, resume: &Resume) -> Result<(), AppError> {
        let text = serde_yaml::to_string(resume)?;
        fs::write(self.version_path(version), text)?;
        Ok(())
    }

    fn exists(&self, version: &str) -> bool {
        self.version_path(version).exists()
    }

    fn list_versions(&self) -> Result<Vec<String>, AppError> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(stem) = name.strip_suffix(".yaml") {
                versions.push(stem.to_string());
            }
        }
        versions.sort();
        Ok(versions)
    }

    /// Creates a new version from the standard template.
    fn create_version(&self, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Version name cannot be empty.".to_string(),
            ));
        }
        if self.exists(name) {
            return Err(AppError::Validation(format!(
                "Version '{name}' already exists."
            )));
        }
        fs::write(self.version_path(name), TEMPLATE_YAML)?;
        info!("Created resume version '{name}' from template");
        Ok(())
    }

    fn delete(&self, version: &str) -> Result<(), AppError> {
        if !self.exists(version) {
            return Err(AppError::DocumentNotFound(version.to_string()));
        }
        fs::remove_file(self.version_path(version))?;
        Ok(())
    }
}

/// Decodes a document, distinguishing the malformed root shapes (empty or
/// null, list at root, other non-mapping scalar) before the typed decode.
fn decode_resume(text: &str, path: &Path) -> Result<Resume, AppError> {
    let value: Value = serde_yaml::from_str(text)?;
    let name = path.display();
    match value {
        Value::Null => Err(AppError::MalformedDocument(format!(
            "Resume file {name} is empty or contains only null values"
        ))),
        Value::Sequence(_) => Err(AppError::MalformedDocument(format!(
            "Resume file {name} contains a list at root level, expected a mapping"
        ))),
        Value::Mapping(_) => Ok(serde_yaml::from_value(value)?),
        other => Err(AppError::MalformedDocument(format!(
            "Resume file {name} contains {} at root level, expected a mapping",
            yaml_type_name(&other)
        ))),
    }
}

fn yaml_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
