//! Extension de smilconfig pour le catalogue

use anyhow::Result;
use std::path::PathBuf;

const CATALOG_DB_FILE: &str = "catalog.db";

/// Trait d'extension pour smilconfig::Config
pub trait CatalogConfigExt {
    /// Retourne le chemin de la base SQLite du catalogue
    fn catalog_db_path(&self) -> Result<PathBuf>;
}

impl CatalogConfigExt for smilconfig::Config {
    fn catalog_db_path(&self) -> Result<PathBuf> {
        // Crée le répertoire du catalogue s'il n'existe pas
        let catalog_dir = self.get_managed_dir(&["catalog", "directory"], "catalog")?;
        Ok(PathBuf::from(catalog_dir).join(CATALOG_DB_FILE))
    }
}
