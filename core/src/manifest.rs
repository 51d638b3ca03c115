//! Completion markers for generated output.
//!
//! RULE: the manifest is written last, after every file it describes.
//! Its presence is the signal that a master or daily batch landed
//! completely; a missing manifest means the batch is regenerated and
//! any stale files are overwritten.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::GenResult;
use crate::types::RunId;

/// Bump when the manifest layout changes shape.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub run_id: RunId,
    pub seed: u64,
    pub files: Vec<FileDigest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDigest {
    pub name: String,
    pub sha256: String,
    pub bytes: u64,
    pub rows: u64,
}

impl RunManifest {
    pub fn new(seed: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            run_id: Uuid::new_v4().to_string(),
            seed,
            files: Vec::new(),
        }
    }

    /// Digest a finished file as it sits on disk and add it to the
    /// manifest. Call only after the file's final rename.
    pub fn record_file(&mut self, path: &Path, rows: u64) -> GenResult<()> {
        let bytes = std::fs::read(path)?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        self.files.push(FileDigest {
            name: file_name(path),
            sha256: hex::encode(hasher.finalize()),
            bytes: bytes.len() as u64,
            rows,
        });
        Ok(())
    }

    pub fn write(&self, path: &Path) -> GenResult<()> {
        write_json_pretty(path, self)
    }

    pub fn load(path: &Path) -> GenResult<RunManifest> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Pretty-printed JSON through a temp file and a rename, same crash
/// discipline as the parquet writes.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> GenResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, text.as_bytes())?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

pub fn master_manifest_path(dir: &Path) -> PathBuf {
    dir.join("master_manifest.json")
}

pub fn daily_manifest_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(format!("manifest_{date}.json"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
