//! Error types for the kodama engine

use thiserror::Error;

/// Main error type for the engine.
///
/// Growth and mesh generation never fail; only the configuration boundary
/// produces errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
