//! Types d'erreurs pour smilservice

use smilcatalog::CatalogError;
use smilmanifest::ManifestError;
use smiltransport::TransportError;

/// Erreurs de génération et de publication des manifestes
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Failed to list tenants: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to stage manifest: {0}")]
    Staging(#[source] std::io::Error),

    #[error("Failed to upload {path}: {source}")]
    Upload {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to set permissions on {path}: {source}")]
    Permissions {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to set ownership on {path}: {source}")]
    Ownership {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: TransportError,
    },
}

/// Type Result spécialisé pour smilservice
pub type Result<T> = std::result::Result<T, ServiceError>;
