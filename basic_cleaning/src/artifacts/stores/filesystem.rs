//! Filesystem-backed artifact store.
//!
//! Layout under the root directory:
//!
//! ```text
//! <root>/<name>/v0/<file>
//! <root>/<name>/v0/manifest.json
//! <root>/runs/<job_type>-<timestamp>.json
//! ```
//!
//! Versions are immutable once written; publishing an existing name creates the
//! next version.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::artifacts::error::{ArtifactError, ArtifactResult};
use crate::artifacts::store::{
    file_digest, ArtifactHandle, ArtifactRef, ArtifactSpec, ArtifactStore, RunMetadata,
};

const MANIFEST_FILE: &str = "manifest.json";
const RUNS_DIR: &str = "runs";

/// Run record persisted next to the artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub metadata: RunMetadata,
    /// Resolved input references (`name:vN`).
    pub inputs: Vec<String>,
    /// Published output references (`name:vN`).
    pub outputs: Vec<String>,
}

struct ActiveRun {
    record: RunRecord,
    path: PathBuf,
    finished: bool,
}

/// Artifact store that keeps versions as plain directories.
pub struct FilesystemArtifactStore {
    root: PathBuf,
    run: RwLock<Option<ActiveRun>>,
}

impl FilesystemArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            run: RwLock::new(None),
        }
    }

    /// Versions stored for `name`, ascending.
    pub fn versions(&self, name: &str) -> ArtifactResult<Vec<u32>> {
        let dir = self.artifact_dir(name)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut versions: Vec<u32> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(MANIFEST_FILE).is_file())
            .filter_map(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .and_then(|s| s.strip_prefix('v'))
                    .and_then(|n| n.parse().ok())
            })
            .collect();
        versions.sort_unstable();
        Ok(versions)
    }

    /// Read the manifest of a stored version.
    pub fn manifest(&self, name: &str, version: u32) -> ArtifactResult<ArtifactHandle> {
        let path = self.version_dir(name, version)?.join(MANIFEST_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            ArtifactError::Manifest(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The record of the latest run attached to this store, if any.
    pub fn current_run(&self) -> Option<RunRecord> {
        self.run
            .read()
            .ok()
            .and_then(|guard| guard.as_ref().map(|run| run.record.clone()))
    }

    fn artifact_dir(&self, name: &str) -> ArtifactResult<PathBuf> {
        // Artifact names may carry a project prefix ("project/name")
        let safe: String = name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        if matches!(safe.as_str(), "" | "." | ".." | RUNS_DIR) {
            return Err(ArtifactError::InvalidReference(name.to_string()));
        }
        Ok(self.root.join(safe))
    }

    fn version_dir(&self, name: &str, version: u32) -> ArtifactResult<PathBuf> {
        Ok(self.artifact_dir(name)?.join(format!("v{}", version)))
    }

    fn update_run<F>(&self, update: F) -> ArtifactResult<()>
    where
        F: FnOnce(&mut RunRecord),
    {
        let mut guard = self
            .run
            .write()
            .map_err(|e| ArtifactError::Storage(format!("Run record lock poisoned: {}", e)))?;

        if let Some(run) = guard.as_mut().filter(|run| !run.finished) {
            update(&mut run.record);
            write_json(&run.path, &run.record)?;
        }
        Ok(())
    }
}

impl ArtifactStore for FilesystemArtifactStore {
    fn resolve(&self, name: &str) -> ArtifactResult<PathBuf> {
        let reference = ArtifactRef::parse(name)?;

        let version = match reference.version {
            Some(version) => version,
            None => *self
                .versions(&reference.name)?
                .last()
                .ok_or_else(|| ArtifactError::NotFound(name.to_string()))?,
        };

        let dir = self.version_dir(&reference.name, version)?;
        if !dir.is_dir() {
            return Err(ArtifactError::NotFound(name.to_string()));
        }

        let manifest = self.manifest(&reference.name, version)?;
        let path = dir.join(&manifest.file_name);
        if !path.is_file() {
            return Err(ArtifactError::NotFound(format!(
                "{} (file {} missing)",
                name,
                path.display()
            )));
        }

        debug!("Resolved {} to {}", name, path.display());
        let used = manifest.reference();
        self.update_run(|record| record.inputs.push(used))?;

        Ok(path)
    }

    fn publish(&self, spec: &ArtifactSpec, file: &Path) -> ArtifactResult<ArtifactHandle> {
        if !file.is_file() {
            return Err(ArtifactError::Storage(format!(
                "Attached file {} does not exist",
                file.display()
            )));
        }

        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ArtifactError::Storage(format!("Invalid file name: {}", file.display()))
            })?
            .to_string();

        let version = self
            .versions(&spec.name)?
            .last()
            .map(|v| v + 1)
            .unwrap_or(0);
        let dir = self.version_dir(&spec.name, version)?;
        fs::create_dir_all(&dir)?;

        let location = dir.join(&file_name);
        fs::copy(file, &location)?;

        let handle = ArtifactHandle {
            name: spec.name.clone(),
            version,
            artifact_type: spec.artifact_type.clone(),
            description: spec.description.clone(),
            file_name,
            digest: file_digest(&location)?,
            location,
            created_at: Utc::now(),
        };
        write_json(&dir.join(MANIFEST_FILE), &handle)?;

        info!("Published artifact {} to {}", handle, dir.display());
        let produced = handle.reference();
        self.update_run(|record| record.outputs.push(produced))?;

        Ok(handle)
    }

    fn record_run_metadata(&self, metadata: &RunMetadata) -> ArtifactResult<()> {
        let runs_dir = self.root.join(RUNS_DIR);
        fs::create_dir_all(&runs_dir)?;

        let path = runs_dir.join(format!(
            "{}-{}.json",
            metadata.job_type,
            metadata.started_at.format("%Y%m%dT%H%M%S%.6f")
        ));
        let record = RunRecord {
            metadata: metadata.clone(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        };
        write_json(&path, &record)?;

        let mut guard = self
            .run
            .write()
            .map_err(|e| ArtifactError::Storage(format!("Run record lock poisoned: {}", e)))?;
        *guard = Some(ActiveRun {
            record,
            path,
            finished: false,
        });
        Ok(())
    }

    fn finish_run(&self) -> ArtifactResult<()> {
        let mut guard = self
            .run
            .write()
            .map_err(|e| ArtifactError::Storage(format!("Run record lock poisoned: {}", e)))?;

        if let Some(run) = guard.as_mut() {
            run.finished = true;
            debug!("Closed run record {}", run.path.display());
        }
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> ArtifactResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
