//! Shapes exchanged between peers.
//!
//! All types serialize to the camelCase JSON used on the wire.

mod device;
mod file;
mod request;

pub use device::{DeviceMessage, DeviceType, Protocol, PROTOCOL_VERSION};
pub use file::{FileInfo, TransferState};
pub use request::{FileRequest, FileResponse, UploadParam};
