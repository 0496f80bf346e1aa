//! Application-wide error types.

use bluecarbon_registry::RegistryError;
use thiserror::Error;

use crate::surface::SurfaceError;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Map surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command error: {0}")]
    Command(String),

    #[error("No record with id {0}")]
    NotFound(String),

    #[error("Invalid date range: {0}")]
    DateRange(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
