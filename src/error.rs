//! Crate-level error type unifying input loading and image inspection
//! failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::formats::pe::types::PeError;
use crate::io::error::IoError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Pe(#[from] PeError),

    #[error("no readable assembly found in {}", dir.display())]
    NoAssemblyFound { dir: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;
