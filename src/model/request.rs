use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{DeviceMessage, FileInfo};

/// A device offering a set of files, keyed by file id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRequest {
    pub info: DeviceMessage,
    pub files: HashMap<String, FileInfo>,
}

impl FileRequest {
    pub fn new(info: DeviceMessage) -> Self {
        Self {
            info,
            files: HashMap::new(),
        }
    }

    /// Adds a file under its own id, returning the entry it replaced.
    pub fn insert(&mut self, file: FileInfo) -> Option<FileInfo> {
        self.files.insert(file.id.clone(), file)
    }

    /// Sum of all file sizes, saturating at `u64::MAX`.
    pub fn total_size(&self) -> u64 {
        self.files
            .values()
            .fold(0u64, |total, file| total.saturating_add(file.size))
    }

    pub fn file_ids(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// The receiver's answer to a [`FileRequest`]: one upload token per
/// accepted file id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub session_id: String,
    pub files: HashMap<String, String>,
}

/// Identifies a single upload within a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadParam {
    pub session_id: String,
    pub file_id: String,
    pub token: String,
}
