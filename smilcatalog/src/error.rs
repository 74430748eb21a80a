//! Types d'erreurs pour smilcatalog

/// Erreurs d'accès au catalogue
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to open catalog: {0}")]
    Open(String),

    #[error("Catalog query failed: {0}")]
    Query(String),

    #[error("Catalog connection lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Type Result spécialisé pour smilcatalog
pub type Result<T> = std::result::Result<T, CatalogError>;
