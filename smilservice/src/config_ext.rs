//! Extension de smilconfig pour le service de manifestes

use crate::{ManifestService, PublishSettings, ServiceSettings, DEFAULT_MANIFEST_FILE_NAME};
use smilcatalog::Catalog;
use smilmanifest::ManifestConfigExt;
use smiltransport::Transport;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait d'extension pour smilconfig::Config
pub trait ServiceConfigExt {
    /// Paramètres de publication (`publish.*`)
    fn publish_settings(&self) -> PublishSettings;

    /// Paramètres de l'orchestrateur (`manifest.media_root`, `manifest.file_name`, `batch.*`)
    fn service_settings(&self) -> ServiceSettings;

    /// Service complet branché sur les collaborateurs fournis
    fn manifest_service(
        &self,
        catalog: Arc<dyn Catalog>,
        transport: Arc<dyn Transport>,
    ) -> ManifestService;
}

impl ServiceConfigExt for smilconfig::Config {
    fn publish_settings(&self) -> PublishSettings {
        let defaults = PublishSettings::default();
        let staging_dir = self.get_string(&["publish", "staging_dir"], "");
        PublishSettings {
            staging_dir: (!staging_dir.is_empty()).then(|| PathBuf::from(staging_dir)),
            file_mode: self.get_string(&["publish", "file_mode"], &defaults.file_mode),
            owner: self.get_string(&["publish", "owner"], &defaults.owner),
        }
    }

    fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            media_root: self.get_media_root(),
            file_name: self.get_string(&["manifest", "file_name"], DEFAULT_MANIFEST_FILE_NAME),
            default_server_id: self.get_default_server_id(),
            max_concurrent_tenants: self.get_max_concurrent_tenants(),
        }
    }

    fn manifest_service(
        &self,
        catalog: Arc<dyn Catalog>,
        transport: Arc<dyn Transport>,
    ) -> ManifestService {
        ManifestService::new(
            catalog,
            transport,
            self.manifest_builder(),
            self.publish_settings(),
            self.service_settings(),
        )
    }
}
