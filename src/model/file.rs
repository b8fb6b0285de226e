use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{size::format_size, LansendError, Result};

/// Metadata of one file offered in a [`crate::FileRequest`], together with
/// the state of its transfer.
///
/// Deserializing fails when the transfer state is inconsistent with the
/// file, the same way [`FileInfo::record_progress`] does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawFileInfo")]
pub struct FileInfo {
    /// Unique within the request that carries the file.
    pub id: String,
    pub file_name: String,
    /// Total size in bytes.
    pub size: u64,
    /// MIME type or a coarse category such as `image`.
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    /// Raw thumbnail bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "TransferState::is_pending")]
    transfer: TransferState,
}

/// Where a file is in its transfer.
///
/// Progress only exists together with the number of bytes it was derived
/// from, so a file can never report a fraction without a byte count.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum TransferState {
    #[default]
    Pending,
    InProgress {
        /// Bytes received so far.
        downloaded: u64,
        /// Bytes per second.
        speed: f64,
    },
    Completed,
}

impl TransferState {
    pub fn is_pending(&self) -> bool {
        matches!(self, TransferState::Pending)
    }
}

/// Unchecked wire form of [`FileInfo`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFileInfo {
    id: String,
    file_name: String,
    size: u64,
    file_type: String,
    #[serde(default)]
    sha256: Option<String>,
    #[serde(default)]
    preview: Option<Vec<u8>>,
    #[serde(default)]
    transfer: TransferState,
}

impl TryFrom<RawFileInfo> for FileInfo {
    type Error = LansendError;

    fn try_from(raw: RawFileInfo) -> Result<Self> {
        let file = FileInfo {
            id: raw.id,
            file_name: raw.file_name,
            size: raw.size,
            file_type: raw.file_type,
            sha256: raw.sha256,
            preview: raw.preview,
            transfer: TransferState::Pending,
        };
        if let TransferState::InProgress { downloaded, speed } = raw.transfer {
            file.check_progress(downloaded, speed)?;
        }
        Ok(FileInfo {
            transfer: raw.transfer,
            ..file
        })
    }
}

impl FileInfo {
    pub fn new(
        id: impl Into<String>,
        file_name: impl Into<String>,
        size: u64,
        file_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            size,
            file_type: file_type.into(),
            sha256: None,
            preview: None,
            transfer: TransferState::Pending,
        }
    }

    pub fn with_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.sha256 = Some(sha256.into());
        self
    }

    pub fn with_preview(mut self, preview: Vec<u8>) -> Self {
        self.preview = Some(preview);
        self
    }

    pub fn state(&self) -> &TransferState {
        &self.transfer
    }

    /// Bytes transferred so far, `None` before the transfer starts.
    pub fn downloaded(&self) -> Option<u64> {
        match self.transfer {
            TransferState::Pending => None,
            TransferState::InProgress { downloaded, .. } => Some(downloaded),
            TransferState::Completed => Some(self.size),
        }
    }

    /// Current rate in bytes per second, only while transferring.
    pub fn speed(&self) -> Option<f64> {
        match self.transfer {
            TransferState::InProgress { speed, .. } => Some(speed),
            _ => None,
        }
    }

    /// Completed fraction in `[0.0, 1.0]`, `None` before the transfer starts.
    pub fn progress(&self) -> Option<f64> {
        match self.transfer {
            TransferState::Pending => None,
            TransferState::InProgress { downloaded, .. } => {
                if self.size == 0 {
                    Some(0.0)
                } else {
                    Some(downloaded as f64 / self.size as f64)
                }
            }
            TransferState::Completed => Some(1.0),
        }
    }

    /// Records how far the transfer of this file has come.
    ///
    /// Errors:
    /// - `InvalidArgument` if `downloaded` exceeds the file size or `speed`
    ///   is negative or not finite.
    /// - `InvalidState` if the file has already been completed.
    pub fn record_progress(&mut self, downloaded: u64, speed: f64) -> Result<()> {
        if matches!(self.transfer, TransferState::Completed) {
            warn!("Progress reported for completed file {}", self.id);
            return Err(LansendError::InvalidState(format!(
                "file {} is already completed",
                self.id
            )));
        }
        self.check_progress(downloaded, speed)?;

        self.transfer = TransferState::InProgress { downloaded, speed };
        Ok(())
    }

    fn check_progress(&self, downloaded: u64, speed: f64) -> Result<()> {
        if downloaded > self.size {
            warn!(
                "File {} reported {} bytes but only has {}",
                self.id, downloaded, self.size
            );
            return Err(LansendError::InvalidArgument(format!(
                "downloaded {} exceeds size {} of file {}",
                downloaded, self.size, self.id
            )));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(LansendError::InvalidArgument(format!(
                "invalid speed {} for file {}",
                speed, self.id
            )));
        }
        Ok(())
    }

    pub fn mark_completed(&mut self) {
        debug!("File {} ({}) completed", self.id, self.file_name);
        self.transfer = TransferState::Completed;
    }

    pub fn display_size(&self) -> String {
        format_size(self.size)
    }
}
