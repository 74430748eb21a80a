//! # smilcatalog - Accès au catalogue des playlists et vidéos
//!
//! Cette crate expose le contrat de lecture du catalogue relationnel utilisé
//! pour générer les manifestes SMIL :
//! - les comptes actifs (un tenant par ligne distincte)
//! - les playlists d'un tenant, triées par identifiant
//! - les vidéos d'une playlist, restreintes au tenant propriétaire
//!
//! L'implémentation fournie repose sur SQLite ([`SqliteCatalog`]). Tout autre
//! stockage peut implémenter le trait [`Catalog`].
//!
//! ```no_run
//! use smilcatalog::{Catalog, SqliteCatalog};
//!
//! # #[tokio::main]
//! # async fn main() -> smilcatalog::Result<()> {
//! let catalog = SqliteCatalog::open("catalog.db".as_ref())?;
//! for account in catalog.active_tenants().await? {
//!     let playlists = catalog.playlists_for_tenant(account.tenant_id).await?;
//!     println!("{}: {} playlist(s)", account.email, playlists.len());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod record;
mod sqlite;

#[cfg(feature = "smilconfig")]
mod config_ext;

use async_trait::async_trait;

pub use error::{CatalogError, Result};
pub use record::{login_from_email, AccountRecord, PlaylistRecord, ServerId, Tenant, VideoRecord};
pub use sqlite::SqliteCatalog;

#[cfg(feature = "smilconfig")]
pub use config_ext::CatalogConfigExt;

/// Contrat de lecture du catalogue
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Comptes actifs (statut actif, e-mail renseigné), dédoublonnés
    async fn active_tenants(&self) -> Result<Vec<AccountRecord>>;

    /// Playlists d'un tenant, par identifiant croissant
    async fn playlists_for_tenant(&self, tenant_id: i64) -> Result<Vec<PlaylistRecord>>;

    /// Vidéos d'une playlist appartenant au tenant, par identifiant croissant
    async fn videos_for_playlist(
        &self,
        playlist_id: i64,
        tenant_id: i64,
    ) -> Result<Vec<VideoRecord>>;
}
