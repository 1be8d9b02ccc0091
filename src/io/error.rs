//! Error types for bounded input loading.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("file size of {found} bytes exceeds the {limit}-byte ceiling")]
    FileTooLarge { limit: u64, found: u64 },

    #[error("I/O error: {0}")]
    StdIo(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IoError>;
