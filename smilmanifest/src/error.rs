//! Types d'erreurs pour smilmanifest

use smilcatalog::CatalogError;

/// Erreurs de génération d'un manifeste
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to render SMIL document: {0}")]
    Render(String),
}

/// Type Result spécialisé pour smilmanifest
pub type Result<T> = std::result::Result<T, ManifestError>;
