use crate::utils::hash::sha256_hex;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// `detected_type` value the server uses when it cannot classify a file.
pub const UNKNOWN_FILE_TYPE: &str = "UNKNOWN";

// The file the user picked or dropped. Replaced on the next pick, never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("{} does not name a file", path.display()))?;
        let content = tokio::fs::read(path).await?;
        Ok(Self::new(name, content))
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn sha256(&self) -> String {
        sha256_hex(&self.content)
    }
}

/// One submission. Built fresh per submit and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub id: Uuid,
    pub file: SelectedFile,
    pub virustotal: bool,
}

impl CheckRequest {
    pub fn new(file: SelectedFile, virustotal: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            virustotal,
        }
    }
}

// Response structure
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub filename: String,
    pub extension: String,
    pub detected_type: String,
    pub detected_description: String,
    pub mismatch: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virustotal: Option<ScanResult>,
}

impl CheckResult {
    pub fn is_unknown(&self) -> bool {
        self.detected_type == UNKNOWN_FILE_TYPE
    }
}

/// Scan payload nested in a check result. The variant is picked by shape;
/// anything matching no known shape lands in `Unrecognised` so the file
/// check itself still decodes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ScanResult {
    Error(ScanError),
    Verdict(ScanVerdict),
    Unscanned(ScanPending),
    Unrecognised(serde_json::Value),
}

impl ScanResult {
    pub fn filehash(&self) -> Option<&str> {
        match self {
            ScanResult::Error(_) | ScanResult::Unrecognised(_) => None,
            ScanResult::Verdict(v) => Some(&v.filehash),
            ScanResult::Unscanned(p) => Some(&p.filehash),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScanError {
    pub error: String,
    pub message: Option<String>,
    pub details: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScanVerdict {
    pub filehash: String,
    pub malicious: u64,
    pub suspicious: u64,
    #[serde(default)]
    pub undetected: u64,
    #[serde(default)]
    pub harmless: u64,
    /// Unix seconds of the last analysis.
    pub date: Option<i64>,
    pub permalink: String,
    pub status: Option<String>,
}

impl ScanVerdict {
    pub fn is_clean(&self) -> bool {
        self.malicious == 0 && self.suspicious == 0
    }
}

// File hash unknown to the scanner yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScanPending {
    pub filehash: String,
    pub message: Option<String>,
    pub link: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Idle,
    Submitting,
    ShowingResult,
    ShowingError,
}

impl UiState {
    pub fn is_busy(self) -> bool {
        self == UiState::Submitting
    }
}
