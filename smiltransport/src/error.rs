//! Types d'erreurs pour smiltransport

use crate::ServerId;

/// Erreurs du transport distant
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Unknown server: {0}")]
    UnknownServer(ServerId),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote command failed on server {server} ({status}): {stderr}")]
    CommandFailed {
        server: ServerId,
        status: String,
        stderr: String,
    },

    #[error("Upload to {remote} failed ({status}): {stderr}")]
    UploadFailed {
        remote: String,
        status: String,
        stderr: String,
    },

    #[error("Remote file not found: {0}")]
    NotFound(String),

    #[error("Unexpected remote output: {0}")]
    UnexpectedOutput(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour smiltransport
pub type Result<T> = std::result::Result<T, TransportError>;
