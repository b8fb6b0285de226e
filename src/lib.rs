//! Shared vocabulary of a LocalSend-style LAN file sharing client.
//!
//! This crate provides:
//! - `model`: the JSON shapes peers exchange (`DeviceMessage`,
//!   `FileRequest`, `FileInfo`, `FileResponse`, `UploadParam`).
//! - `size`: human-readable byte counts (`1.50 KB`, `3.00 GB`, ...).
//! - `session`: the receiver's record of an accepted request, with upload
//!   tokens and per-file progress.
//! - `config`: the local device settings, persisted as TOML.
//!
//! ```
//! use lansend::{format_size, FileInfo};
//!
//! let file = FileInfo::new("1", "holiday.mp4", 3 * 1024 * 1024, "video/mp4");
//! assert_eq!(file.display_size(), "3.00 MB");
//! assert_eq!(format_size(1023), "1023 Bytes");
//! ```

pub mod config;
mod errors;
pub mod model;
pub mod session;
pub mod size;

pub use config::DeviceSettings;
pub use errors::{LansendError, Result};
pub use model::{
    DeviceMessage, DeviceType, FileInfo, FileRequest, FileResponse,
    Protocol, TransferState, UploadParam,
};
pub use session::Session;
pub use size::{format_size, format_speed, try_format_size};
