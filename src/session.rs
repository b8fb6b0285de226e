//! Receiver-side record of an accepted [`FileRequest`].
//!
//! A session hands out one upload token per accepted file and tracks the
//! progress of every file until all of them are completed.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use uuid::Uuid;

use crate::{
    model::{
        DeviceMessage, FileInfo, FileRequest, FileResponse, TransferState,
        UploadParam,
    },
    LansendError, Result,
};

#[derive(Clone, Debug)]
pub struct Session {
    id: String,
    sender: DeviceMessage,
    files: HashMap<String, FileInfo>,
    tokens: HashMap<String, String>,
    file_ids_by_token: HashMap<String, String>,
}

impl Session {
    /// Opens a session for `files`, minting a fresh id and one token per
    /// file.
    pub fn new(sender: DeviceMessage, files: HashMap<String, FileInfo>) -> Self {
        let id = Uuid::new_v4().to_string();
        let mut tokens = HashMap::with_capacity(files.len());
        let mut file_ids_by_token = HashMap::with_capacity(files.len());
        for file_id in files.keys() {
            let token = Uuid::new_v4().to_string();
            tokens.insert(file_id.clone(), token.clone());
            file_ids_by_token.insert(token, file_id.clone());
        }

        debug!(
            "Session {} opened for {} file(s) from {}",
            id,
            files.len(),
            sender.alias
        );
        Self {
            id,
            sender,
            files,
            tokens,
            file_ids_by_token,
        }
    }

    /// Opens a session for the files of `request` whose ids are in
    /// `accepted`. Ids that the request does not contain are ignored.
    pub fn accept(request: FileRequest, accepted: &HashSet<String>) -> Self {
        let files = request
            .files
            .into_iter()
            .filter(|(file_id, _)| accepted.contains(file_id))
            .collect();
        Self::new(request.info, files)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sender(&self) -> &DeviceMessage {
        &self.sender
    }

    pub fn files(&self) -> &HashMap<String, FileInfo> {
        &self.files
    }

    pub fn file(&self, file_id: &str) -> Option<&FileInfo> {
        self.files.get(file_id)
    }

    pub fn token(&self, file_id: &str) -> Option<&str> {
        self.tokens.get(file_id).map(String::as_str)
    }

    pub fn response(&self) -> FileResponse {
        FileResponse {
            session_id: self.id.clone(),
            files: self.tokens.clone(),
        }
    }

    /// Resolves the file an upload is meant for.
    ///
    /// Errors:
    /// - `Unauthorized` if the session id does not match or the token was
    ///   not issued for `param.file_id`.
    pub fn authorize(&self, param: &UploadParam) -> Result<&FileInfo> {
        if param.session_id != self.id {
            trace!(
                "Upload for session {} rejected by {}",
                param.session_id,
                self.id
            );
            return Err(LansendError::Unauthorized);
        }
        match self.file_ids_by_token.get(&param.token) {
            Some(file_id) if *file_id == param.file_id => self
                .files
                .get(file_id)
                .ok_or(LansendError::Unauthorized),
            _ => {
                trace!("Invalid token for file {}", param.file_id);
                Err(LansendError::Unauthorized)
            }
        }
    }

    pub fn record_progress(
        &mut self,
        file_id: &str,
        downloaded: u64,
        speed: f64,
    ) -> Result<()> {
        self.file_mut(file_id)?.record_progress(downloaded, speed)
    }

    pub fn mark_completed(&mut self, file_id: &str) -> Result<()> {
        self.file_mut(file_id)?.mark_completed();
        if self.is_complete() {
            debug!("Session {} completed", self.id);
        }
        Ok(())
    }

    /// Sum of all file sizes, saturating at `u64::MAX`.
    pub fn total_size(&self) -> u64 {
        self.files
            .values()
            .fold(0u64, |total, file| total.saturating_add(file.size))
    }

    /// Bytes received over all files, saturating at `u64::MAX`.
    pub fn downloaded_bytes(&self) -> u64 {
        self.files
            .values()
            .filter_map(FileInfo::downloaded)
            .fold(0u64, u64::saturating_add)
    }

    /// Aggregate completed fraction over all files of the session.
    ///
    /// An empty session, or one whose files are all empty, counts as done
    /// once every file is completed and as `0.0` before that.
    pub fn progress(&self) -> f64 {
        let total = self.total_size();
        if total == 0 {
            return if self.is_complete() { 1.0 } else { 0.0 };
        }
        self.downloaded_bytes() as f64 / total as f64
    }

    /// True once every file has been marked completed.
    pub fn is_complete(&self) -> bool {
        self.files
            .values()
            .all(|file| matches!(file.state(), TransferState::Completed))
    }

    fn file_mut(&mut self, file_id: &str) -> Result<&mut FileInfo> {
        self.files
            .get_mut(file_id)
            .ok_or_else(|| LansendError::UnknownFile(file_id.to_string()))
    }
}
