//! # smilmanifest - Génération des manifestes SMIL
//!
//! Cette crate transforme les playlists d'un tenant en document SMIL :
//! - [`escape_xml`] : échappement des cinq caractères réservés
//! - [`PathResolver`] : chemin de lecture d'une vidéo (stockage, URL, défaut)
//! - [`ManifestBuilder`] : assemblage du document, avec une entrée par défaut
//!   lorsque le tenant n'a aucune vidéo
//!
//! Le document est écrit élément par élément avec `quick-xml` ; aucun gabarit
//! textuel n'est substitué.
//!
//! ```
//! use smilmanifest::ManifestBuilder;
//!
//! let manifest = ManifestBuilder::default().render("alice", &[]).unwrap();
//! assert_eq!(manifest.entries_count, 1);
//! assert!(manifest.xml.contains("alice/default/demo.mp4"));
//! ```

mod builder;
mod document;
mod error;
mod escape;
mod path;

#[cfg(feature = "smilconfig")]
mod config_ext;

pub use builder::{Manifest, ManifestBuilder, ManifestMetadata, PlaylistContent};
pub use error::{ManifestError, Result};
pub use escape::escape_xml;
pub use path::{PathResolver, DEFAULT_LEGACY_URL_PREFIX, DEFAULT_MEDIA_ROOT};

#[cfg(feature = "smilconfig")]
pub use config_ext::ManifestConfigExt;
