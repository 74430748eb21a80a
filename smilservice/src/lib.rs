//! # smilservice - Publication des manifestes SMIL
//!
//! Cette crate relie le catalogue, la génération des manifestes et le
//! transport distant :
//! - [`Publisher`] : fichier de transit, envoi, `chmod`/`chown`, nettoyage garanti
//! - [`ManifestService`] : génération par tenant, mise à jour, suppression,
//!   test d'existence et régénération globale
//!
//! # Exemple
//!
//! ```no_run
//! use smilcatalog::SqliteCatalog;
//! use smilmanifest::ManifestBuilder;
//! use smilservice::{ManifestService, PublishSettings, ServiceSettings};
//! use smiltransport::SshTransport;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(SqliteCatalog::open("catalog.db".as_ref())?);
//! let transport = Arc::new(SshTransport::new(HashMap::new()));
//! let service = ManifestService::new(
//!     catalog,
//!     transport,
//!     ManifestBuilder::default(),
//!     PublishSettings::default(),
//!     ServiceSettings::default(),
//! );
//!
//! let outcome = service.regenerate_all().await?;
//! println!("{}/{} manifests published", outcome.success_count, outcome.total);
//! # Ok(())
//! # }
//! ```

mod error;
mod publisher;
mod service;

#[cfg(feature = "smilconfig")]
mod config_ext;

pub use error::{Result, ServiceError};
pub use publisher::{PublishReport, PublishSettings, Publisher};
pub use service::{
    BatchOutcome, GenerationReport, ManifestService, ServiceSettings, TenantOutcome,
    DEFAULT_MANIFEST_FILE_NAME, DEFAULT_SERVER_ID,
};

#[cfg(feature = "smilconfig")]
pub use config_ext::ServiceConfigExt;
