//! Extension de smilconfig pour la génération des manifestes

use crate::{ManifestBuilder, ManifestMetadata, PathResolver, DEFAULT_LEGACY_URL_PREFIX};

/// Trait d'extension pour smilconfig::Config
pub trait ManifestConfigExt {
    /// Résolveur de chemins configuré (`manifest.media_root`, `manifest.legacy_url_prefix`)
    fn path_resolver(&self) -> PathResolver;

    /// Textes de l'en-tête SMIL (`manifest.title`, `manifest.copyright`, `manifest.description`)
    fn manifest_metadata(&self) -> ManifestMetadata;

    fn manifest_builder(&self) -> ManifestBuilder {
        ManifestBuilder::new(self.path_resolver(), self.manifest_metadata())
    }
}

impl ManifestConfigExt for smilconfig::Config {
    fn path_resolver(&self) -> PathResolver {
        PathResolver::new(
            &self.get_media_root(),
            &self.get_string(&["manifest", "legacy_url_prefix"], DEFAULT_LEGACY_URL_PREFIX),
        )
    }

    fn manifest_metadata(&self) -> ManifestMetadata {
        let defaults = ManifestMetadata::default();
        ManifestMetadata {
            title: self.get_string(&["manifest", "title"], &defaults.title),
            copyright: self.get_string(&["manifest", "copyright"], &defaults.copyright),
            description: self.get_string(&["manifest", "description"], &defaults.description),
        }
    }
}
