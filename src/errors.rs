use thiserror::Error;

pub type Result<T> = std::result::Result<T, LansendError>;

#[derive(Error, Debug)]
pub enum LansendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    TomlRead(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    TomlWrite(#[from] toml::ser::Error),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Unknown file: {0}")]
    UnknownFile(String),
    #[error("Upload is not authorized")]
    Unauthorized,
    #[error("Config error: {0}")]
    Config(String),
}
