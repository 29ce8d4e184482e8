use thiserror::Error;

use crate::rotation::RotationMode;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Jump target {target} is out of range for {len} items")]
    OutOfRange { target: i64, len: usize },

    #[error("Rotation needs at least 2 items, got {item_count}")]
    DegenerateConfiguration { item_count: usize },

    #[error("Rotation interval must be a positive number of milliseconds")]
    InvalidInterval,

    #[error("{operation} is not supported in {mode} mode")]
    Unsupported {
        operation: &'static str,
        mode: RotationMode,
    },

    #[error("Rotator service is no longer running")]
    ServiceClosed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
