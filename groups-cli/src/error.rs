use data_error::DataError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Couldn't load seed: {0}")]
    SeedLoadError(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    DataError(#[from] DataError),
}
